//! Submodule registration, finalization and the diagnostics path.

use fabric_diagnostics::{DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use fabric_dsl::{elaborate, errors, DslError, Module};
use fabric_ir::{Domain, Fragment, IrContext, Platform};

#[test]
fn three_submodules_in_registration_order() {
    let ctx = IrContext::new();
    let tx = ctx.signal("tx", 1);
    let rx = ctx.signal("rx", 1);

    let mut uart_tx = Module::new(&ctx);
    uart_tx.sync().append(tx.assign(true)).unwrap();
    let mut uart_rx = Module::new(&ctx);
    uart_rx.sync().append(rx.assign(false)).unwrap();

    let mut top = Module::new(&ctx);
    top.add_named_submodule("tx", uart_tx);
    top.add_submodule(Module::new(&ctx));
    top.add_named_submodule("rx", uart_rx);

    let frag = top.finalize(&Platform::default()).unwrap();
    let names: Vec<_> = frag
        .subfragments
        .iter()
        .map(|(_, name)| name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("tx"), None, Some("rx")]);
    assert_eq!(
        frag.find_subfragment("tx").unwrap().drivers,
        vec![(tx, Domain::clocked("sync"))]
    );
    assert_eq!(
        frag.find_subfragment("rx").unwrap().drivers,
        vec![(rx, Domain::clocked("sync"))]
    );
    assert!(frag.subfragments[1].0.statements.is_empty());
}

#[test]
fn batch_registration_keeps_order() {
    let ctx = IrContext::new();
    let lanes: Vec<_> = (0..3).map(|i| ctx.signal(&format!("lane{i}"), 1)).collect();
    let children: Vec<_> = lanes
        .iter()
        .map(|lane| {
            let mut child = Module::new(&ctx);
            child.comb().append(lane.assign(true)).unwrap();
            child
        })
        .collect();

    let mut top = Module::new(&ctx);
    top.add_named_submodule("first", Module::new(&ctx));
    top.add_submodules(children);
    let frag = top.finalize(&Platform::default()).unwrap();

    assert_eq!(frag.subfragments.len(), 4);
    assert_eq!(frag.subfragments[0].1.as_deref(), Some("first"));
    for (lane, (child, name)) in lanes.iter().zip(&frag.subfragments[1..]) {
        assert_eq!(name, &None);
        assert_eq!(child.drivers, vec![(*lane, Domain::Comb)]);
    }
}

#[test]
fn duplicate_names_are_kept() {
    let ctx = IrContext::new();
    let mut top = Module::new(&ctx);
    top.add_named_submodule("lane", Module::new(&ctx));
    top.add_named_submodule("lane", Module::new(&ctx));
    let frag = top.finalize(&Platform::default()).unwrap();
    assert_eq!(frag.subfragments.len(), 2);
}

#[test]
fn prebuilt_fragment_as_submodule() {
    let ctx = IrContext::new();
    let o = ctx.signal("o", 1);
    let mut prebuilt = Fragment::new();
    prebuilt.add_statements(o.assign(true));
    prebuilt.drive(o, Domain::Comb);

    let mut top = Module::new(&ctx);
    top.add_named_submodule("blackbox", prebuilt.clone());
    let frag = top.finalize(&Platform::new("ice40")).unwrap();
    assert_eq!(frag.find_subfragment("blackbox"), Some(&prebuilt));
}

#[test]
fn submodule_failure_propagates() {
    let ctx = IrContext::new();
    let c = ctx.signal("c", 1);
    let mut child = Module::new(&ctx);
    let _open = child.open_if(c).unwrap();

    let mut top = Module::new(&ctx);
    top.add_submodule(child);
    assert_eq!(
        top.finalize(&Platform::default()).unwrap_err(),
        DslError::UnclosedScope { count: 1 }
    );
}

#[test]
fn finalize_flushes_pending_chain_before_statements_are_taken() {
    let ctx = IrContext::new();
    let c = ctx.signal("c", 1);
    let o = ctx.signal("o", 1);
    let mut m = Module::new(&ctx);
    m.comb().append(o.assign(false)).unwrap();
    m.if_(c, |m| m.comb().append(o.assign(true))).unwrap();

    let frag = m.finalize(&Platform::default()).unwrap();
    assert_eq!(frag.statements.len(), 2);
    assert!(frag.statements[0].as_assign().is_some());
    assert!(frag.statements[1].as_switch().is_some());
    assert_eq!(frag.drivers, vec![(o, Domain::Comb)]);
}

#[test]
fn elaborate_returns_fragment_on_success() {
    let ctx = IrContext::new();
    let o = ctx.signal("o", 1);
    let mut m = Module::new(&ctx);
    m.comb().append(o.assign(true)).unwrap();

    let sink = DiagnosticSink::new();
    let frag = elaborate(m, &Platform::default(), &sink).unwrap();
    assert_eq!(frag.statements.len(), 1);
    assert!(!sink.has_errors());
}

#[test]
fn elaborate_reports_failures_as_diagnostics() {
    let ctx = IrContext::new();
    let c = ctx.signal("c", 1);
    let mut m = Module::new(&ctx);
    let _left_open = m.open_case(c, None).unwrap();

    let sink = DiagnosticSink::new();
    assert!(elaborate(m, &Platform::default(), &sink).is_none());
    assert_eq!(sink.error_count(), 1);

    let diags = sink.take_all();
    assert_eq!(diags[0].severity, Severity::Error);
    assert_eq!(diags[0].code, errors::E308);
    let rendered = TerminalRenderer.render(&diags[0]);
    assert!(rendered.starts_with("error[E308]"), "{rendered}");
    assert!(rendered.contains("scopes must be closed innermost first"));
}

#[test]
fn fragment_dumps_to_json() {
    let ctx = IrContext::new();
    let c = ctx.signal("c", 1);
    let o = ctx.signal("o", 1);
    let mut m = Module::new(&ctx);
    m.if_(c, |m| m.sync().append(o.assign(true))).unwrap();
    m.else_(|m| m.sync().append(o.assign(false))).unwrap();
    let frag = m.finalize(&Platform::default()).unwrap();

    let json = serde_json::to_string(&frag).unwrap();
    let back: Fragment = serde_json::from_str(&json).unwrap();
    assert_eq!(back, frag);
}

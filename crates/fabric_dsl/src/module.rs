//! The module builder.
//!
//! A [`Module`] collects assignments per domain and nested If/Elif/Else and
//! Case blocks. Every open scope has its own [`Frame`]; frame 0 is the
//! module's top level. Chains are lowered into switch statements when they
//! can no longer grow: when a statement is appended at their level, when an
//! unrelated chain starts there, when their enclosing scope closes, or when
//! the module is finalized.

use crate::case::{case_pattern, CaseChain, CaseValue};
use crate::domain::{DomainHandle, DomainRouter};
use crate::driver::DriverMap;
use crate::errors::DslError;
use crate::scope::{Frame, OpenScope, ScopeKind, ScopeToken};
use crate::submodule::{Elaboratable, SubmoduleRegistry};
use fabric_config::{FabricConfig, PriorityEncoding};
use fabric_ir::{
    Domain, Fragment, IntoStatements, IrContext, Platform, Statement, Value, ValueKey,
};

/// A module under construction.
///
/// Created empty, mutated while the design is described, and consumed by
/// [`finalize`](Module::finalize).
pub struct Module<'ctx> {
    ctx: &'ctx IrContext,
    router: DomainRouter,
    encoding: PriorityEncoding,
    submodules: SubmoduleRegistry<'ctx>,
    drivers: DriverMap,
    frames: Vec<Frame>,
    scopes: Vec<OpenScope>,
}

impl<'ctx> Module<'ctx> {
    /// Creates an empty module with the default configuration.
    pub fn new(ctx: &'ctx IrContext) -> Self {
        Self::with_config(ctx, &FabricConfig::default())
    }

    /// Creates an empty module using `config` for domain names and lowering.
    pub fn with_config(ctx: &'ctx IrContext, config: &FabricConfig) -> Self {
        Self {
            ctx,
            router: DomainRouter::new(&config.domains),
            encoding: config.lowering.priority,
            submodules: SubmoduleRegistry::default(),
            drivers: DriverMap::new(),
            frames: vec![Frame::default()],
            scopes: Vec::new(),
        }
    }

    /// The context signals of this module come from.
    pub fn context(&self) -> &'ctx IrContext {
        self.ctx
    }

    /// The current nesting depth; 0 at the module's top level.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The domains driving each signal so far.
    pub fn drivers(&self) -> &DriverMap {
        &self.drivers
    }

    /// A handle for the domain called `name`.
    ///
    /// The configured unclocked name (`comb` by default) resolves to
    /// [`Domain::Comb`]; any other name is a clock domain.
    pub fn d(&mut self, name: &str) -> DomainHandle<'_, 'ctx> {
        let domain = self.router.resolve(name);
        DomainHandle::new(self, domain)
    }

    /// A handle for an already resolved domain.
    pub fn domain(&mut self, domain: Domain) -> DomainHandle<'_, 'ctx> {
        DomainHandle::new(self, domain)
    }

    /// A handle for the unclocked domain.
    pub fn comb(&mut self) -> DomainHandle<'_, 'ctx> {
        DomainHandle::new(self, Domain::Comb)
    }

    /// A handle for the configured default clock domain (`sync` by default).
    pub fn sync(&mut self) -> DomainHandle<'_, 'ctx> {
        let domain = self.router.default_clocked();
        DomainHandle::new(self, domain)
    }

    /// Opens an If scope, flushing any chain pending at this level first.
    pub fn open_if(&mut self, cond: impl Into<Value>) -> Result<ScopeToken, DslError> {
        self.flush(self.depth())?;
        Ok(self.push_scope(ScopeKind::If(cond.into())))
    }

    /// Opens an Elif scope continuing the If chain pending at this level.
    pub fn open_elif(&mut self, cond: impl Into<Value>) -> Result<ScopeToken, DslError> {
        if self.current_frame()?.if_chain.is_empty() {
            return Err(DslError::ElifWithoutIf);
        }
        Ok(self.push_scope(ScopeKind::Elif(cond.into())))
    }

    /// Opens the Else scope ending the If chain pending at this level.
    pub fn open_else(&mut self) -> Result<ScopeToken, DslError> {
        if self.current_frame()?.if_chain.is_empty() {
            return Err(DslError::ElseWithoutIf);
        }
        Ok(self.push_scope(ScopeKind::Else))
    }

    /// Opens a Case scope matching `test` against `value` (anything, if `None`).
    ///
    /// Consecutive Case scopes over structurally equal tests extend one
    /// switch; a different test flushes the pending switch first.
    pub fn open_case(
        &mut self,
        test: impl Into<Value>,
        value: Option<CaseValue<'_>>,
    ) -> Result<ScopeToken, DslError> {
        let test = test.into();
        let pattern = case_pattern(value, test.width())?;
        let key = ValueKey::new(&test);
        let depth = self.depth();
        let continues = self
            .current_frame()?
            .case_chain
            .as_ref()
            .is_some_and(|chain| chain.is_same_test(&key));
        if !continues {
            self.flush(depth)?;
            self.frame_mut(depth)?.case_chain = Some(CaseChain::new(key));
        }
        Ok(self.push_scope(ScopeKind::Case(pattern)))
    }

    /// Closes the innermost open scope, which `token` must belong to.
    ///
    /// Chains left pending inside the body are lowered before the body is
    /// handed to its enclosing If chain or switch.
    pub fn close(&mut self, token: ScopeToken) -> Result<(), DslError> {
        match self.scopes.last() {
            Some(scope) if scope.is_closed_by(&token) => {}
            Some(scope) => {
                return Err(DslError::ScopeOrder {
                    innermost: scope.kind.to_string(),
                })
            }
            None => {
                return Err(DslError::ScopeOrder {
                    innermost: "none".to_string(),
                })
            }
        }

        self.flush(self.depth())?;
        let scope = self
            .scopes
            .pop()
            .ok_or_else(|| DslError::internal("scope stack empty after check"))?;
        let body = self
            .frames
            .pop()
            .ok_or_else(|| DslError::internal("frame stack empty on close"))?
            .statements;

        let depth = self.depth();
        let frame = self.frame_mut(depth)?;
        match scope.kind {
            ScopeKind::If(cond) | ScopeKind::Elif(cond) => frame.if_chain.push_branch(cond, body),
            ScopeKind::Else => {
                frame.if_chain.push_else(body);
                self.flush(depth)?;
            }
            ScopeKind::Case(pattern) => frame
                .case_chain
                .as_mut()
                .ok_or_else(|| DslError::internal("case scope closed without a pending switch"))?
                .insert(pattern, body),
        }
        Ok(())
    }

    /// Runs `body` inside an If scope.
    pub fn if_(
        &mut self,
        cond: impl Into<Value>,
        body: impl FnOnce(&mut Self) -> Result<(), DslError>,
    ) -> Result<(), DslError> {
        let token = self.open_if(cond)?;
        body(self)?;
        self.close(token)
    }

    /// Runs `body` inside an Elif scope.
    pub fn elif(
        &mut self,
        cond: impl Into<Value>,
        body: impl FnOnce(&mut Self) -> Result<(), DslError>,
    ) -> Result<(), DslError> {
        let token = self.open_elif(cond)?;
        body(self)?;
        self.close(token)
    }

    /// Runs `body` inside an Else scope.
    pub fn else_(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), DslError>,
    ) -> Result<(), DslError> {
        let token = self.open_else()?;
        body(self)?;
        self.close(token)
    }

    /// Runs `body` inside a Case scope.
    pub fn case(
        &mut self,
        test: impl Into<Value>,
        value: Option<CaseValue<'_>>,
        body: impl FnOnce(&mut Self) -> Result<(), DslError>,
    ) -> Result<(), DslError> {
        let token = self.open_case(test, value)?;
        body(self)?;
        self.close(token)
    }

    /// Appends prebuilt statements, switches included, to `domain`.
    ///
    /// This bypasses the assignment-only check of [`DomainHandle::append`]
    /// but still claims every signal assigned anywhere inside the statements.
    pub fn append_lowered(
        &mut self,
        statements: impl IntoStatements,
        domain: &Domain,
    ) -> Result<(), DslError> {
        let depth = self.depth();
        self.flush_below(depth)?;
        for stmt in statements.into_statements() {
            for assign in stmt.assigns() {
                for signal in assign.lhs_signals() {
                    self.drivers.claim(self.ctx, signal, domain)?;
                }
            }
            self.frame_mut(depth)?.statements.push(stmt);
        }
        Ok(())
    }

    /// Registers an anonymous submodule.
    pub fn add_submodule(&mut self, submodule: impl Elaboratable + 'ctx) {
        self.submodules.add(Box::new(submodule), None);
    }

    /// Registers a named submodule. Names are not checked for uniqueness.
    pub fn add_named_submodule(
        &mut self,
        name: impl Into<String>,
        submodule: impl Elaboratable + 'ctx,
    ) {
        self.submodules.add(Box::new(submodule), Some(name.into()));
    }

    /// Registers several anonymous submodules at once, in iteration order.
    pub fn add_submodules<S>(&mut self, submodules: impl IntoIterator<Item = S>)
    where
        S: Elaboratable + 'ctx,
    {
        for submodule in submodules {
            self.add_submodule(submodule);
        }
    }

    /// Finalizes the module into a fragment.
    ///
    /// Lowers any pending chain, elaborates every submodule in registration
    /// order with `platform`, and attaches the module's statements and
    /// driver map.
    pub fn finalize(mut self, platform: &Platform) -> Result<Fragment, DslError> {
        if !self.scopes.is_empty() {
            return Err(DslError::UnclosedScope {
                count: self.scopes.len(),
            });
        }
        self.flush(0)?;

        let mut fragment = Fragment::new();
        let submodule_count = self.submodules.len();
        for (submodule, name) in self.submodules {
            fragment.add_subfragment(submodule.elaborate(platform)?, name);
        }
        let top = self
            .frames
            .pop()
            .ok_or_else(|| DslError::internal("frame stack empty on finalize"))?;
        fragment.add_statements(top.statements);
        for (signal, domain) in self.drivers {
            fragment.drive(signal, domain);
        }

        log::debug!(
            "finalized module for platform `{}`: {} submodule(s), {} statement(s), {} driven signal(s)",
            platform.name,
            submodule_count,
            fragment.statements.len(),
            fragment.drivers.len()
        );
        Ok(fragment)
    }

    /// The assignment sink behind [`DomainHandle::append`].
    pub(crate) fn append(
        &mut self,
        statements: Vec<Statement>,
        domain: &Domain,
        depth: usize,
    ) -> Result<(), DslError> {
        self.flush_below(depth)?;
        for stmt in statements {
            let Statement::Assign(assign) = &stmt else {
                return Err(DslError::NonAssignment {
                    domain: domain.clone(),
                });
            };
            for signal in assign.lhs_signals() {
                self.drivers.claim(self.ctx, signal, domain)?;
            }
            log::trace!("appended assignment to d.{domain} at depth {depth}");
            self.frame_mut(depth)?.statements.push(stmt);
        }
        Ok(())
    }

    /// Flushes the chains pending at `depth`: they collected bodies one level
    /// deeper, and a statement arriving at `depth` ends them.
    fn flush_below(&mut self, depth: usize) -> Result<(), DslError> {
        if self.frame_mut(depth)?.has_pending() {
            self.flush(depth)?;
        }
        Ok(())
    }

    /// Lowers the If chain and the switch pending at `depth`, if any.
    pub(crate) fn flush(&mut self, depth: usize) -> Result<(), DslError> {
        let encoding = self.encoding;
        let frame = self.frame_mut(depth)?;
        if !frame.if_chain.is_empty() {
            let chain = std::mem::take(&mut frame.if_chain);
            frame.statements.push(chain.lower(encoding)?.into());
        }
        if let Some(chain) = frame.case_chain.take() {
            frame.statements.push(chain.lower()?.into());
        }
        Ok(())
    }

    fn push_scope(&mut self, kind: ScopeKind) -> ScopeToken {
        let (scope, token) = OpenScope::new(kind);
        self.scopes.push(scope);
        self.frames.push(Frame::default());
        token
    }

    fn current_frame(&self) -> Result<&Frame, DslError> {
        self.frames
            .last()
            .ok_or_else(|| DslError::internal("frame stack empty"))
    }

    fn frame_mut(&mut self, depth: usize) -> Result<&mut Frame, DslError> {
        self.frames
            .get_mut(depth)
            .ok_or_else(|| DslError::internal(format!("no frame at depth {depth}")))
    }
}

impl Elaboratable for Module<'_> {
    fn elaborate(self: Box<Self>, platform: &Platform) -> Result<Fragment, DslError> {
        (*self).finalize(platform)
    }
}

//! Candidate function space
//!
//! The loader populates a `FunctionSpace` with compilation units before any
//! site that refers to them is bootstrapped. After `build()` the space is
//! immutable and shared between threads behind an `Arc`; the resolver only
//! reads it.
//!
//! ```
//! use closure_link::space::FunctionSpace;
//! use closure_link_runtime::Value;
//!
//! let space = FunctionSpace::builder()
//!     .unit("lists", |u| {
//!         u.function("to_list", 2, |args| Ok(Value::list(args.iter().cloned())))
//!     })
//!     .unit("main", |u| u.import("lists"))
//!     .build()
//!     .unwrap();
//! assert_eq!(space.len(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use closure_link_runtime::{RuntimeResult, Value};

use crate::error::SpaceError;
use crate::reference::SymbolicRef;

/// Native body of a function definition.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> RuntimeResult<Value> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Eligible through imports
    Public,
    /// Only visible inside the defining unit
    Private,
}

/// A named, arity-tagged function owned by a compilation unit.
pub struct FunctionDef {
    unit: String,
    name: String,
    arity: usize,
    variadic: bool,
    visibility: Visibility,
    body: NativeFn,
}

impl FunctionDef {
    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter count. For variadic definitions the last
    /// parameter receives the rest arguments as a tuple.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn matches(&self, reference: &SymbolicRef) -> bool {
        self.name == reference.name() && self.arity == reference.arity()
    }

    /// `unit::name/arity`
    pub fn qualified_name(&self) -> String {
        format!("{}::{}/{}", self.unit, self.name, self.arity)
    }

    /// Run the body with exactly the declared parameters.
    pub fn call(&self, args: &[Value]) -> RuntimeResult<Value> {
        (self.body)(args)
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("unit", &self.unit)
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("variadic", &self.variadic)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct CompilationUnit {
    name: String,
    functions: Vec<Arc<FunctionDef>>,
    imports: Vec<String>,
}

impl CompilationUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn functions(&self) -> &[Arc<FunctionDef>] {
        &self.functions
    }

    /// Imported unit names in declaration order
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Definitions matching name and arity, regardless of visibility
    pub fn matching<'a>(
        &'a self,
        reference: &'a SymbolicRef,
    ) -> impl Iterator<Item = &'a Arc<FunctionDef>> + 'a {
        self.functions.iter().filter(move |def| def.matches(reference))
    }

    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Arc<FunctionDef>> + 'a {
        self.functions.iter().filter(move |def| def.name == name)
    }
}

#[derive(Debug, Default)]
pub struct FunctionSpace {
    units: HashMap<String, Arc<CompilationUnit>>,
}

impl FunctionSpace {
    pub fn builder() -> FunctionSpaceBuilder {
        FunctionSpaceBuilder::default()
    }

    pub fn unit(&self, name: &str) -> Option<&Arc<CompilationUnit>> {
        self.units.get(name)
    }

    pub fn units(&self) -> impl Iterator<Item = &Arc<CompilationUnit>> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct FunctionSpaceBuilder {
    units: Vec<UnitBuilder>,
}

impl FunctionSpaceBuilder {
    /// Declare a unit and its contents through `define`.
    pub fn unit<F>(mut self, name: impl Into<String>, define: F) -> Self
    where
        F: FnOnce(UnitBuilder) -> UnitBuilder,
    {
        self.units.push(define(UnitBuilder::new(name)));
        self
    }

    pub fn add_unit(mut self, unit: UnitBuilder) -> Self {
        self.units.push(unit);
        self
    }

    pub fn build(self) -> Result<FunctionSpace, SpaceError> {
        let mut units = HashMap::with_capacity(self.units.len());
        for builder in self.units {
            let unit = builder.finish()?;
            if units.contains_key(&unit.name) {
                return Err(SpaceError::DuplicateUnit(unit.name));
            }
            units.insert(unit.name.clone(), Arc::new(unit));
        }
        Ok(FunctionSpace { units })
    }
}

struct PendingDef {
    name: String,
    arity: usize,
    variadic: bool,
    visibility: Visibility,
    body: NativeFn,
}

pub struct UnitBuilder {
    name: String,
    functions: Vec<PendingDef>,
    imports: Vec<String>,
}

impl UnitBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn import(mut self, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        if !self.imports.contains(&unit) {
            self.imports.push(unit);
        }
        self
    }

    /// Public fixed-arity function
    pub fn function<F>(self, name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        self.define(name, arity, false, Visibility::Public, body)
    }

    /// Fixed-arity function visible only inside this unit
    pub fn private_function<F>(self, name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        self.define(name, arity, false, Visibility::Private, body)
    }

    /// Public function whose last of `arity` parameters collects the rest arguments
    pub fn variadic_function<F>(self, name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        self.define(name, arity, true, Visibility::Public, body)
    }

    pub fn define<F>(
        mut self,
        name: impl Into<String>,
        arity: usize,
        variadic: bool,
        visibility: Visibility,
        body: F,
    ) -> Self
    where
        F: Fn(&[Value]) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        self.functions.push(PendingDef {
            name: name.into(),
            arity,
            variadic,
            visibility,
            body: Arc::new(body),
        });
        self
    }

    fn finish(self) -> Result<CompilationUnit, SpaceError> {
        let UnitBuilder {
            name,
            functions,
            imports,
        } = self;
        let mut defs = Vec::with_capacity(functions.len());
        for pending in functions {
            if pending.name.is_empty() {
                return Err(SpaceError::InvalidDefinition {
                    unit: name,
                    name: pending.name,
                    reason: "function name must not be empty".to_string(),
                });
            }
            if pending.variadic && pending.arity == 0 {
                return Err(SpaceError::InvalidDefinition {
                    unit: name,
                    name: pending.name,
                    reason: "variadic function needs a rest parameter".to_string(),
                });
            }
            defs.push(Arc::new(FunctionDef {
                unit: name.clone(),
                name: pending.name,
                arity: pending.arity,
                variadic: pending.variadic,
                visibility: pending.visibility,
                body: pending.body,
            }));
        }
        Ok(CompilationUnit {
            name,
            functions: defs,
            imports,
        })
    }
}

impl fmt::Debug for UnitBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .functions
            .iter()
            .map(|d| format!("{}/{}", d.name, d.arity))
            .collect();
        f.debug_struct("UnitBuilder")
            .field("name", &self.name)
            .field("functions", &names)
            .field("imports", &self.imports)
            .finish()
    }
}

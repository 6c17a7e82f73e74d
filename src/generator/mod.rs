pub mod docs;
pub mod ts;
pub mod type_mapper;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::RenderConfig;
use crate::error::UsageError;
use crate::known_types::{APP_OBJECT, ARC, CLIENT_CONTEXT, PARAMS_ARG, REQUEST};
use crate::models::{ApiType, Const, Field, Function, Module};
use crate::resolver::{AppObject, ResolvedApi};

/// Context for code generation
#[derive(Debug, Clone)]
pub struct GeneratorContext {
    /// Render configuration
    pub render: RenderConfig,
}

impl GeneratorContext {
    pub fn new(render: RenderConfig) -> Self {
        Self { render }
    }

    /// Class name of a module wrapper
    pub fn format_module_class(&self, module: &str) -> String {
        format!(
            "{}{}",
            crate::utils::to_pascal_case(module),
            self.render.module_class_suffix
        )
    }
}

impl Default for GeneratorContext {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

/// Text emission contract shared by every renderer.
///
/// Each operation renders one syntactic unit and is a pure function of the
/// resolved api and its arguments.
pub trait Generator {
    fn api(&self) -> &ResolvedApi;

    /// Extension of generated files and fenced code samples
    fn language(&self) -> &'static str;

    /// Type expression without trailing declaration syntax
    fn render_type(&self, ty: &ApiType, indent: &str) -> String;

    /// Named declaration of a module level type
    fn render_type_def(&self, ty: &Field) -> String;

    /// Member declaration
    fn render_field(&self, field: &Field, indent: &str) -> String;

    /// Member of a tagged union
    fn render_variant(&self, variant: &Field, indent: &str) -> String;

    /// Member of an enumeration
    fn render_const(&self, value: &Const) -> String;

    fn render_function_signature(&self, module: &Module, func: &Function) -> String;

    fn render_function_body(&self, module: &Module, func: &Function) -> String;

    /// Declaration of a bidirectional callback surface
    fn render_callback_interface(&self, obj: &AppObject) -> String;

    /// One self-contained unit for a module
    fn render_module(&self, module: &Module) -> String;

    /// Index unit covering every module
    fn render_all(&self) -> String;

    /// Logical file name -> generated text
    fn files(&self) -> BTreeMap<String, String>;
}

/// Call shape of a function
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionInfo<'a> {
    /// Positional `params` argument
    pub params: Option<&'a Field>,
    /// Accepts a response handler callback
    pub has_response_handler: bool,
    /// Accepts a bidirectional callback object
    pub app_object: Option<&'a AppObject>,
}

/// Classify the parameters of `module.func`.
///
/// Context parameters are dropped, an app object suppresses the response handler.
pub fn function_info<'a>(api: &'a ResolvedApi, module: &Module, func: &'a Function) -> FunctionInfo<'a> {
    let mut info = FunctionInfo::default();
    for param in &func.params {
        match &param.ty {
            ApiType::Generic {
                generic_name,
                generic_args,
            } if generic_name == ARC => match generic_args.first().and_then(ApiType::ref_name) {
                Some(CLIENT_CONTEXT) => {}
                Some(REQUEST) => info.has_response_handler = true,
                _ => {}
            },
            ApiType::Generic { generic_name, .. } if generic_name == APP_OBJECT => {
                info.app_object = api.app_object_for(&module.name, &func.name);
            }
            _ if param.name == PARAMS_ARG => info.params = Some(param),
            _ => {}
        }
    }
    if info.app_object.is_some() {
        info.has_response_handler = false;
    }
    info
}

/// What an enum-of-types variant carries besides its `type` discriminant
#[derive(Debug, Clone, PartialEq)]
pub enum VariantPayload<'a> {
    /// Nothing, rendered as the bare name literal
    Unit,
    /// Members of an inline or hoisted struct, a tuple member exposed as `value`
    Fields(Vec<Field>),
    /// A named struct defined elsewhere, spread next to the discriminant
    External(&'a Field),
    /// Any other type, carried as `value`
    Value(&'a ApiType),
}

pub const VALUE_FIELD: &str = "value";

/// Classify a variant with the single rule shared by every renderer
pub fn variant_payload<'a>(api: &'a ResolvedApi, variant: &'a Field) -> VariantPayload<'a> {
    match &variant.ty {
        ApiType::None => VariantPayload::Unit,
        ApiType::Struct { struct_fields } => VariantPayload::Fields(struct_members(struct_fields)),
        ty @ ApiType::Ref { .. } => match api.resolve_ref(ty) {
            Some(target) => match &target.ty {
                ApiType::Struct { struct_fields } if target.is_internal => {
                    VariantPayload::Fields(struct_members(struct_fields))
                }
                ApiType::Struct { .. } => VariantPayload::External(target),
                _ => VariantPayload::Value(ty),
            },
            None => VariantPayload::Value(ty),
        },
        other => VariantPayload::Value(other),
    }
}

/// Members of a struct, a tuple member renamed to `value`
pub fn struct_members(fields: &[Field]) -> Vec<Field> {
    match fields {
        [single] if single.name.is_empty() => vec![Field {
            name: VALUE_FIELD.to_string(),
            ..single.clone()
        }],
        _ => fields.to_vec(),
    }
}

/// Supported output backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// TypeScript client bindings
    Ts,
    /// Markdown reference docs built on the TypeScript bindings
    Docs,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Ts, Backend::Docs];

    pub fn tag(&self) -> &'static str {
        match self {
            Backend::Ts => "ts",
            Backend::Docs => "docs",
        }
    }
}

impl FromStr for Backend {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ts" => Ok(Backend::Ts),
            "docs" => Ok(Backend::Docs),
            other => Err(UsageError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Render every file of a backend
pub fn generate(api: &ResolvedApi, backend: Backend, ctx: &GeneratorContext) -> BTreeMap<String, String> {
    let ts = ts::TsCode::new(api, ctx.clone());
    match backend {
        Backend::Ts => ts.files(),
        Backend::Docs => docs::Docs::new(ts).files(),
    }
}

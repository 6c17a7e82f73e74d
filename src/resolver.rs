//! Schema resolver - links modules, resolves type references and synthesizes derived types

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::SchemaError;
use crate::known_types::{self, APP_OBJECT, ARC, CLIENT_RESULT, PARAMS_ARG, PARAMS_OF_PREFIX};
use crate::models::{bare_name, Api, ApiType, Field, Function, Module, TypeId};
use crate::utils::pascal_to_snake;

/// A callback surface synthesized from an `AppObject<Params, Result>` parameter
#[derive(Debug, Clone, PartialEq)]
pub struct AppObject {
    /// Pseudo module holding one function per params variant
    pub module: Module,
    /// Name of the module whose function first referenced this app object
    pub owner: String,
    /// Qualified name of the params enum
    pub params_type: String,
    /// Qualified name of the result enum
    pub result_type: String,
    /// Params variant name for each function, in the same order
    pub variants: Vec<String>,
}

/// The api after linking, reference resolution and synthesis.
///
/// Read-only: renderers only get shared references into it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedApi {
    api: Api,
    types: HashMap<String, TypeId>,
    app_objects: Vec<AppObject>,
    /// `module.function` -> index into `app_objects`
    app_object_index: HashMap<String, usize>,
}

impl ResolvedApi {
    pub fn version(&self) -> &str {
        &self.api.version
    }

    pub fn modules(&self) -> &[Module] {
        &self.api.modules
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.api.modules.iter().find(|m| m.name == name)
    }

    /// Module level type at a resolved position
    pub fn field(&self, id: TypeId) -> &Field {
        field_at(&self.api, id)
    }

    /// Module owning a resolved position
    pub fn owner_of(&self, id: TypeId) -> &Module {
        &self.api.modules[id.module]
    }

    /// Find a type by its qualified `module.name`
    pub fn find_type(&self, qualified: &str) -> Option<&Field> {
        self.types.get(qualified).map(|id| self.field(*id))
    }

    /// Target of a resolved ref, `None` for anything else
    pub fn resolve_ref(&self, ty: &ApiType) -> Option<&Field> {
        match ty {
            ApiType::Ref {
                target: Some(id), ..
            } => Some(self.field(*id)),
            _ => None,
        }
    }

    pub fn app_objects(&self) -> &[AppObject] {
        &self.app_objects
    }

    /// App object passed to `module.function`, if any
    pub fn app_object_for(&self, module: &str, function: &str) -> Option<&AppObject> {
        self.app_object_index
            .get(&format!("{}.{}", module, function))
            .map(|i| &self.app_objects[*i])
    }

    /// App objects owned by a module, in order of first reference
    pub fn app_objects_of<'a>(&'a self, module: &'a Module) -> impl Iterator<Item = &'a AppObject> {
        self.app_objects
            .iter()
            .filter(move |obj| obj.owner == module.name)
    }
}

/// Parse and resolve an api.json document
pub fn resolve_json(json: &str) -> Result<ResolvedApi, SchemaError> {
    let api: Api = serde_json::from_str(json)?;
    resolve(api)
}

/// Resolve a raw api into a fully linked, read-only graph
pub fn resolve(mut api: Api) -> Result<ResolvedApi, SchemaError> {
    validate(&api)?;

    for module in &mut api.modules {
        for func in &mut module.functions {
            unwrap_client_result(func);
        }
        let hoisted = hoist_variants(module);
        if hoisted > 0 {
            debug!(module = %module.name, hoisted, "Hoisted enum variant payloads");
        }
    }

    let linker = Linker::link(&api)?;

    for module in &mut api.modules {
        let owner = module.name.clone();
        for ty in &mut module.types {
            let context = format!("{}.{}", owner, ty.name);
            linker.resolve_refs(&mut ty.ty, &owner, &context)?;
        }
        for func in &mut module.functions {
            let context = format!("{}.{}", owner, func.name);
            for param in &mut func.params {
                linker.resolve_refs(&mut param.ty, &owner, &context)?;
            }
            linker.resolve_refs(&mut func.result, &owner, &context)?;
        }
    }

    let (app_objects, app_object_index) = synthesize_app_objects(&api)?;

    info!(
        version = %api.version,
        modules = api.modules.len(),
        types = linker.qualified.len(),
        app_objects = app_objects.len(),
        "Resolved api"
    );

    Ok(ResolvedApi {
        api,
        types: linker.qualified,
        app_objects,
        app_object_index,
    })
}

fn field_at(api: &Api, id: TypeId) -> &Field {
    &api.modules[id.module].types[id.index]
}

fn variant_struct_fields<'a>(api: &'a Api, variant: &'a Field) -> Option<&'a [Field]> {
    match &variant.ty {
        ApiType::Struct { struct_fields } => Some(struct_fields),
        ApiType::Ref {
            target: Some(id), ..
        } => match &field_at(api, *id).ty {
            ApiType::Struct { struct_fields } => Some(struct_fields),
            _ => None,
        },
        _ => None,
    }
}

/// Check structural rules that must hold before any rewriting
fn validate(api: &Api) -> Result<(), SchemaError> {
    for module in &api.modules {
        for ty in &module.types {
            validate_type(&ty.ty, &format!("{}.{}", module.name, ty.name))?;
        }
        for func in &module.functions {
            let context = format!("{}.{}", module.name, func.name);
            for param in &func.params {
                validate_type(&param.ty, &context)?;
            }
            validate_type(&func.result, &context)?;
        }
    }
    Ok(())
}

fn validate_type(ty: &ApiType, context: &str) -> Result<(), SchemaError> {
    match ty {
        ApiType::Struct { struct_fields } => {
            if struct_fields.len() > 1 && struct_fields.iter().any(|f| f.name.is_empty()) {
                return Err(SchemaError::TupleArity {
                    context: context.to_string(),
                    found: struct_fields.len(),
                });
            }
            for field in struct_fields {
                validate_type(&field.ty, context)?;
            }
            Ok(())
        }
        ApiType::Optional { optional_inner } => validate_type(optional_inner, context),
        ApiType::Array { array_item } => validate_type(array_item, context),
        ApiType::EnumOfTypes { enum_types } => {
            for variant in enum_types {
                validate_type(&variant.ty, context)?;
            }
            Ok(())
        }
        ApiType::Generic {
            generic_name,
            generic_args,
        } => {
            let expected = match generic_name.as_str() {
                CLIENT_RESULT | ARC => Some(1),
                APP_OBJECT => Some(2),
                _ => None,
            };
            if let Some(expected) = expected {
                if generic_args.len() != expected {
                    return Err(SchemaError::GenericArity {
                        name: generic_name.clone(),
                        context: context.to_string(),
                        expected,
                        found: generic_args.len(),
                    });
                }
            }
            for arg in generic_args {
                validate_type(arg, context)?;
            }
            Ok(())
        }
        ApiType::None
        | ApiType::Any
        | ApiType::Boolean
        | ApiType::String
        | ApiType::Number { .. }
        | ApiType::BigInt { .. }
        | ApiType::Ref { .. }
        | ApiType::EnumOfConsts { .. } => Ok(()),
    }
}

/// Replace a `ClientResult<T>` result by `T`
fn unwrap_client_result(func: &mut Function) {
    if !func.result.is_generic(CLIENT_RESULT) {
        return;
    }
    if let ApiType::Generic { generic_args, .. } = std::mem::replace(&mut func.result, ApiType::None)
    {
        func.result = generic_args.into_iter().next().unwrap_or(ApiType::None);
    }
}

/// Move inline struct payloads of module level enums into their own types.
///
/// Each hoisted type is inserted right before the enum it came from.
fn hoist_variants(module: &mut Module) -> usize {
    let original = std::mem::take(&mut module.types);
    let mut hoisted = 0;

    for mut ty in original {
        if let ApiType::EnumOfTypes { enum_types } = &mut ty.ty {
            for variant in enum_types.iter_mut() {
                if !matches!(variant.ty, ApiType::Struct { .. }) {
                    continue;
                }
                let name = format!("{}{}Variant", ty.name, variant.name);
                let payload = std::mem::replace(
                    &mut variant.ty,
                    ApiType::reference(format!("{}.{}", module.name, name)),
                );
                module.types.push(Field {
                    name,
                    ty: payload,
                    summary: variant.summary.clone(),
                    description: variant.description.clone(),
                    is_internal: true,
                });
                hoisted += 1;
            }
        }
        module.types.push(ty);
    }

    hoisted
}

/// Name tables built once all types are in place
#[derive(Debug, Default)]
struct Linker {
    /// `module.name` -> position
    qualified: HashMap<String, TypeId>,
    /// `name` -> every qualified definition of it
    bare: HashMap<String, Vec<(String, TypeId)>>,
}

impl Linker {
    fn link(api: &Api) -> Result<Self, SchemaError> {
        let mut linker = Linker::default();
        for (module_index, module) in api.modules.iter().enumerate() {
            for (index, ty) in module.types.iter().enumerate() {
                let id = TypeId {
                    module: module_index,
                    index,
                };
                let qualified = format!("{}.{}", module.name, ty.name);
                if linker.qualified.insert(qualified.clone(), id).is_some() {
                    return Err(SchemaError::DuplicateType(qualified));
                }
                linker
                    .bare
                    .entry(ty.name.clone())
                    .or_default()
                    .push((qualified, id));
            }
        }
        Ok(linker)
    }

    /// Find the definition a ref name denotes from inside `owner`
    fn lookup(&self, name: &str, owner: &str, context: &str) -> Result<(String, TypeId), SchemaError> {
        let unresolved = || SchemaError::UnresolvedRef {
            name: name.to_string(),
            context: context.to_string(),
        };

        if name.contains('.') {
            return self
                .qualified
                .get(name)
                .map(|id| (name.to_string(), *id))
                .ok_or_else(unresolved);
        }

        let scoped = format!("{}.{}", owner, name);
        if let Some(id) = self.qualified.get(&scoped) {
            return Ok((scoped, *id));
        }

        match self.bare.get(name).map(Vec::as_slice) {
            Some([(qualified, id)]) => Ok((qualified.clone(), *id)),
            Some(candidates) if candidates.len() > 1 => Err(SchemaError::AmbiguousRef {
                name: name.to_string(),
                context: context.to_string(),
                candidates: candidates.iter().map(|(q, _)| q.clone()).collect(),
            }),
            _ => Err(unresolved()),
        }
    }

    /// Resolve every ref inside a type, each exactly once
    fn resolve_refs(&self, ty: &mut ApiType, owner: &str, context: &str) -> Result<(), SchemaError> {
        match ty {
            ApiType::Ref { ref_name, target } => {
                if target.is_some() || known_types::is_sentinel_ref(ref_name) {
                    return Ok(());
                }
                let (qualified, id) = self.lookup(ref_name, owner, context)?;
                *ref_name = qualified;
                *target = Some(id);
                Ok(())
            }
            ApiType::Optional { optional_inner } => self.resolve_refs(optional_inner, owner, context),
            ApiType::Array { array_item } => self.resolve_refs(array_item, owner, context),
            ApiType::Struct { struct_fields } => {
                for field in struct_fields {
                    self.resolve_refs(&mut field.ty, owner, context)?;
                }
                Ok(())
            }
            ApiType::EnumOfTypes { enum_types } => {
                for variant in enum_types {
                    self.resolve_refs(&mut variant.ty, owner, context)?;
                }
                Ok(())
            }
            ApiType::Generic { generic_args, .. } => {
                for arg in generic_args {
                    self.resolve_refs(arg, owner, context)?;
                }
                Ok(())
            }
            ApiType::None
            | ApiType::Any
            | ApiType::Boolean
            | ApiType::String
            | ApiType::Number { .. }
            | ApiType::BigInt { .. }
            | ApiType::EnumOfConsts { .. } => Ok(()),
        }
    }
}

type AppObjects = (Vec<AppObject>, HashMap<String, usize>);

fn synthesize_app_objects(api: &Api) -> Result<AppObjects, SchemaError> {
    let mut objects: Vec<AppObject> = Vec::new();
    let mut index = HashMap::new();

    for module in &api.modules {
        for func in &module.functions {
            for param in &func.params {
                let ApiType::Generic {
                    generic_name,
                    generic_args,
                } = &param.ty
                else {
                    continue;
                };
                if generic_name != APP_OBJECT {
                    continue;
                }

                let context = format!("{}.{}", module.name, func.name);
                let obj = build_app_object(api, &module.name, generic_args, &context)?;
                let position = match objects.iter().position(|o| o.module.name == obj.module.name) {
                    Some(position) => position,
                    None => {
                        debug!(
                            app_object = %obj.module.name,
                            functions = obj.module.functions.len(),
                            "Synthesized app object"
                        );
                        objects.push(obj);
                        objects.len() - 1
                    }
                };
                index.insert(context, position);
            }
        }
    }

    Ok((objects, index))
}

/// Enum variants behind a required `AppObject` operand
fn required_enum<'a>(
    api: &'a Api,
    ty: &'a ApiType,
    role: &'static str,
    context: &str,
) -> Result<(&'a str, &'a Field, &'a [Field]), SchemaError> {
    let not_enum = |name: &str| SchemaError::AppObjectNotEnum {
        role,
        name: name.to_string(),
        context: context.to_string(),
    };

    match ty {
        ApiType::Ref {
            ref_name,
            target: Some(id),
        } => {
            let field = field_at(api, *id);
            match &field.ty {
                ApiType::EnumOfTypes { enum_types } => Ok((ref_name, field, enum_types)),
                _ => Err(not_enum(ref_name)),
            }
        }
        ApiType::Ref { ref_name, .. } => Err(not_enum(ref_name)),
        other => Err(not_enum(other.kind())),
    }
}

fn build_app_object(
    api: &Api,
    owner: &str,
    args: &[ApiType],
    context: &str,
) -> Result<AppObject, SchemaError> {
    let (params_type, params_enum, params_variants) = required_enum(api, &args[0], "Params", context)?;
    let (result_type, _, result_variants) = required_enum(api, &args[1], "Result", context)?;

    let params_name = bare_name(params_type);
    let name = params_name
        .strip_prefix(PARAMS_OF_PREFIX)
        .unwrap_or(params_name)
        .to_string();

    let mut functions = Vec::with_capacity(params_variants.len());
    let mut variants = Vec::with_capacity(params_variants.len());

    for params in params_variants {
        let result = result_variants.iter().find(|r| r.name == params.name);

        let function_params = match variant_struct_fields(api, params) {
            Some(fields) if !fields.is_empty() => vec![Field::new(PARAMS_ARG, params.ty.clone())],
            _ => Vec::new(),
        };

        let (result, is_notification) = match result {
            None => (ApiType::None, true),
            Some(result) => match variant_struct_fields(api, result) {
                Some([]) => (ApiType::None, false),
                Some(_) => (result.ty.clone(), false),
                None => (result.ty.clone(), false),
            },
        };

        functions.push(Function {
            name: pascal_to_snake(&params.name),
            summary: params.summary.clone(),
            description: params.description.clone(),
            params: function_params,
            result,
            errors: None,
            is_notification,
        });
        variants.push(params.name.clone());
    }

    Ok(AppObject {
        module: Module {
            name,
            summary: params_enum.summary.clone(),
            description: params_enum.description.clone(),
            types: Vec::new(),
            functions,
        },
        owner: owner.to_string(),
        params_type: params_type.to_string(),
        result_type: result_type.to_string(),
        variants,
    })
}

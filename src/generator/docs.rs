//! Markdown reference renderer
//!
//! Every code sample comes from the wrapped binding renderer, only prose is
//! taken from the schema directly.

use std::collections::BTreeMap;

use crate::known_types;
use crate::models::{ApiType, Const, ConstValue, Field, Function, Module};
use crate::resolver::{AppObject, ResolvedApi};
use crate::utils::Doc;

use super::{function_info, struct_members, variant_payload, Generator, VariantPayload, VALUE_FIELD};

/// Ref chains followed before falling back to a link
const MAX_REF_DEPTH: usize = 4;

fn summary_suffix(summary: Option<&str>) -> String {
    summary.map(|s| format!(" – {}", s)).unwrap_or_default()
}

fn prose(summary: &Option<String>, description: &Option<String>) -> String {
    let doc = Doc::of(summary.as_deref(), description.as_deref());
    let mut md = String::new();
    for text in [doc.summary, doc.description].into_iter().flatten() {
        md.push_str(&text);
        md.push_str("\n\n");
    }
    md
}

fn one_line(summary: &Option<String>, description: &Option<String>) -> String {
    summary_suffix(Doc::of(summary.as_deref(), description.as_deref()).summary.as_deref())
}

pub fn module_file(module: &str) -> String {
    format!("mod_{}.md", module)
}

/// Link to a qualified type, bare names are left as they are
pub fn type_link(ref_name: &str) -> String {
    match ref_name.split_once('.') {
        Some((module, name)) => format!("[{}]({}#{})", name, module_file(module), name),
        None => ref_name.to_string(),
    }
}

/// Documentation renderer delegating code samples to a binding renderer
pub struct Docs<G: Generator> {
    code: G,
}

impl<G: Generator> Docs<G> {
    pub fn new(code: G) -> Self {
        Docs { code }
    }

    /// Short label of a type used in field bullets
    pub fn field_type(&self, ty: &ApiType) -> String {
        match ty {
            ApiType::Ref { ref_name, .. } if known_types::is_dynamic_ref(ref_name) => "any".to_string(),
            ApiType::Ref { ref_name, .. } => type_link(ref_name),
            ApiType::Optional { optional_inner } => format!("{}?", self.field_type(optional_inner)),
            ApiType::Array { array_item } => format!("{}[]", self.field_type(array_item)),
            ApiType::Struct { .. } => "struct".to_string(),
            ApiType::EnumOfTypes { .. } => "enum".to_string(),
            ApiType::EnumOfConsts { .. } => "const".to_string(),
            ApiType::Generic { generic_name, .. } if known_types::is_dynamic_generic(generic_name) => {
                "any".to_string()
            }
            ApiType::Generic {
                generic_name,
                generic_args,
            } => {
                let args: Vec<_> = generic_args.iter().map(|a| self.field_type(a)).collect();
                format!("{}<{}>", generic_name, args.join(", "))
            }
            ApiType::None => "void".to_string(),
            ApiType::Any => "any".to_string(),
            ApiType::Boolean => "boolean".to_string(),
            ApiType::String => "string".to_string(),
            ApiType::Number { .. } => "number".to_string(),
            ApiType::BigInt { .. } => "bigint".to_string(),
        }
    }

    fn describe(&self, ty: &ApiType, indent: &str, depth: usize) -> String {
        match ty {
            ApiType::Ref { .. } => match self.api().resolve_ref(ty) {
                Some(target) if depth < MAX_REF_DEPTH => self.describe(&target.ty, indent, depth + 1),
                _ => format!("{}- _{}_\n", indent, self.field_type(ty)),
            },
            ApiType::Optional { optional_inner } => format!(
                "Optional value of:\n\n{}",
                self.describe(optional_inner, indent, depth)
            ),
            ApiType::Struct { struct_fields } => struct_members(struct_fields)
                .iter()
                .map(|f| self.render_field(f, indent))
                .collect(),
            ApiType::EnumOfTypes { enum_types } => {
                let variants: Vec<_> = enum_types
                    .iter()
                    .map(|v| self.render_variant(v, indent))
                    .collect();
                format!("Depends on value of the  `type` field.\n\n{}", variants.join("\n"))
            }
            ApiType::EnumOfConsts { enum_consts } => {
                let consts: String = enum_consts.iter().map(|c| self.render_const(c)).collect();
                format!("One of the following value:\n\n{}", consts)
            }
            other => format!("{}- _{}_\n", indent, self.field_type(other)),
        }
    }

    fn function_section(&self, module: &Module, func: &Function) -> String {
        let info = function_info(self.api(), module, func);

        let mut md = format!("## {}\n\n{}", func.name, prose(&func.summary, &func.description));

        let mut code = String::new();
        let params_ty = info.params.map(|p| match &p.ty {
            ApiType::Optional { optional_inner } => optional_inner.as_ref(),
            other => other,
        });
        if let Some(params) = params_ty.and_then(|ty| self.api().resolve_ref(ty)) {
            code.push_str(&self.code.render_type_def(params));
        }
        if let Some(result) = self.api().resolve_ref(&func.result) {
            code.push_str(&self.code.render_type_def(result));
        }
        code.push_str(&self.code.render_function_signature(module, func));
        md.push_str(&format!("```{}\n{}```\n", self.code.language(), code));

        if info.params.is_some() || info.has_response_handler || info.app_object.is_some() {
            md.push_str("### Parameters\n");
            if let Some(params) = info.params {
                md.push_str(&self.render_type(&params.ty, ""));
            }
            if info.has_response_handler {
                md.push_str("- `responseHandler`?: _ResponseHandler_ – additional responses handler.\n");
            }
            if let Some(obj) = info.app_object {
                md.push_str(&format!(
                    "- `obj`: _App{}_{}\n",
                    obj.module.name,
                    one_line(&obj.module.summary, &obj.module.description)
                ));
            }
            md.push('\n');
        }

        md.push_str("### Result\n\n");
        md.push_str(&self.render_type(&func.result, ""));
        md
    }

    fn module_doc(&self, module: &Module) -> String {
        let mut md = format!("# Module {}\n\n", module.name);
        md.push_str(&prose(&module.summary, &module.description));

        md.push_str("## Functions\n");
        for func in &module.functions {
            md.push_str(&format!(
                "[{}](#{}){}\n\n",
                func.name,
                func.name,
                one_line(&func.summary, &func.description)
            ));
        }

        md.push_str("## Types\n");
        for ty in &module.types {
            md.push_str(&format!(
                "[{}](#{}){}\n\n",
                ty.name,
                ty.name,
                one_line(&ty.summary, &ty.description)
            ));
        }

        md.push_str("\n# Functions\n");
        for func in &module.functions {
            md.push_str(&self.render_function_body(module, func));
            md.push_str("\n\n");
        }

        md.push_str("# Types\n");
        for ty in &module.types {
            md.push_str(&self.render_type_def(ty));
            md.push_str("\n\n");
        }

        md
    }
}

impl<G: Generator> Generator for Docs<G> {
    fn api(&self) -> &ResolvedApi {
        self.code.api()
    }

    fn language(&self) -> &'static str {
        "md"
    }

    fn render_type(&self, ty: &ApiType, indent: &str) -> String {
        self.describe(ty, indent, 0)
    }

    fn render_type_def(&self, ty: &Field) -> String {
        format!(
            "## {}\n\n{}```{}\n{}```\n{}",
            ty.name,
            prose(&ty.summary, &ty.description),
            self.code.language(),
            self.code.render_type_def(ty),
            self.render_type(&ty.ty, "")
        )
    }

    fn render_field(&self, field: &Field, indent: &str) -> String {
        let (opt, ty) = match &field.ty {
            ApiType::Optional { optional_inner } => ("?", optional_inner.as_ref()),
            ty => ("", ty),
        };
        let name = if field.name.is_empty() {
            String::new()
        } else {
            format!("`{}`{}: ", field.name, opt)
        };
        format!(
            "{}- {}_{}_{}\n",
            indent,
            name,
            self.field_type(ty),
            one_line(&field.summary, &field.description)
        )
    }

    fn render_variant(&self, variant: &Field, indent: &str) -> String {
        let mut md = format!("When _type_ is _'{}'_\n\n", variant.name);
        md.push_str(&prose(&variant.summary, &variant.description));
        match variant_payload(self.api(), variant) {
            VariantPayload::Unit => md.push_str(&format!("`{}`\n", variant.name)),
            VariantPayload::Fields(fields) => {
                for field in &fields {
                    md.push_str(&self.render_field(field, indent));
                }
            }
            VariantPayload::External(target) => md.push_str(&self.render_type(&target.ty, indent)),
            VariantPayload::Value(ty) => {
                md.push_str(&self.render_field(&Field::new(VALUE_FIELD, ty.clone()), indent))
            }
        }
        md
    }

    fn render_const(&self, value: &Const) -> String {
        let literal = match &value.value {
            ConstValue::None => value.name.as_str(),
            ConstValue::Bool { value: literal }
            | ConstValue::String { value: literal }
            | ConstValue::Number { value: literal } => literal.as_str(),
        };
        format!(
            "- `{}`{}\n",
            literal,
            one_line(&value.summary, &value.description)
        )
    }

    fn render_function_signature(&self, module: &Module, func: &Function) -> String {
        self.code.render_function_signature(module, func)
    }

    fn render_function_body(&self, module: &Module, func: &Function) -> String {
        self.function_section(module, func)
    }

    fn render_callback_interface(&self, obj: &AppObject) -> String {
        self.module_doc(&obj.module)
    }

    fn render_module(&self, module: &Module) -> String {
        let mut md = self.module_doc(module);
        for obj in self.api().app_objects_of(module) {
            md.push_str(&self.render_callback_interface(obj));
        }
        md
    }

    fn render_all(&self) -> String {
        let mut md = String::from("# Modules\n");
        for module in self.api().modules() {
            md.push_str(&format!(
                "## [{}]({}){}\n\n",
                module.name,
                module_file(&module.name),
                one_line(&module.summary, &module.description)
            ));
            for func in &module.functions {
                md.push_str(&format!(
                    "[{}]({}#{}){}\n\n",
                    func.name,
                    module_file(&module.name),
                    func.name,
                    one_line(&func.summary, &func.description)
                ));
            }
        }
        md
    }

    fn files(&self) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        files.insert(format!("modules.{}", self.language()), self.render_all());
        for module in self.api().modules() {
            files.insert(module_file(&module.name), self.render_module(module));
        }
        files
    }
}

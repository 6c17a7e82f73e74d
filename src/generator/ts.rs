//! TypeScript binding renderer

use std::collections::BTreeMap;

use crate::models::{bare_name, ApiType, Const, ConstValue, Field, Function, Module};
use crate::resolver::{AppObject, ResolvedApi};
use crate::utils::{lower_first, to_camel_case, Doc};

use super::type_mapper;
use super::{function_info, variant_payload, Generator, GeneratorContext, VariantPayload};

const MODULES_HEADER: &str = r#"export interface ResponseHandler {
    (params: any, responseType: number): void;
}

export interface IClient {
    request(
        functionName: string,
        functionParams?: any,
        responseHandler?: ResponseHandler
    ): Promise<any>;
    resolve_app_request(app_request_id: number | null, result: any): Promise<void>;
    reject_app_request(app_request_id: number | null, error: any): Promise<void>;
}
"#;

/// Response type of an app request expecting an answer
const APP_REQUEST_RESPONSE: u32 = 3;
/// Response type of a one-way app notification
const APP_NOTIFY_RESPONSE: u32 = 4;

const INDENT: &str = "    ";

/// Generator of TypeScript client bindings
pub struct TsCode<'a> {
    api: &'a ResolvedApi,
    ctx: GeneratorContext,
}

impl<'a> TsCode<'a> {
    pub fn new(api: &'a ResolvedApi, ctx: GeneratorContext) -> Self {
        TsCode { api, ctx }
    }

    /// Name of the interface an app object implements
    pub fn app_object_interface_name(obj: &AppObject) -> String {
        format!("App{}", obj.module.name)
    }

    /// JSDoc block, empty unless doc comments are enabled
    fn js_doc(&self, summary: &Option<String>, description: &Option<String>, indent: &str) -> String {
        if !self.ctx.render.include_doc {
            return String::new();
        }
        let doc = Doc::of(summary.as_deref(), description.as_deref());
        let mut lines: Vec<String> = doc.summary.into_iter().collect();
        if let Some(description) = doc.description {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(description.lines().map(str::to_string));
        }
        if lines.is_empty() {
            return String::new();
        }

        let mut out = format!("{}/**\n", indent);
        for line in lines {
            if line.is_empty() {
                out.push_str(&format!("{} *\n", indent));
            } else {
                out.push_str(&format!("{} * {}\n", indent, line));
            }
        }
        out.push_str(&format!("{} */\n", indent));
        out
    }

    fn fields(&self, fields: &[Field], indent: &str) -> String {
        fields
            .iter()
            .map(|f| self.render_field(f, indent))
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// Parameter declaration `name: T`, or `name?: T` when optional is allowed
    fn param_decl(&self, field: &Field, allow_optional: bool) -> String {
        match &field.ty {
            ApiType::Optional { optional_inner } if allow_optional => {
                format!("{}?: {}", field.name, self.render_type(optional_inner, ""))
            }
            ApiType::Optional { optional_inner } => {
                format!("{}: {} | undefined", field.name, self.render_type(optional_inner, ""))
            }
            ty => format!("{}: {}", field.name, self.render_type(ty, "")),
        }
    }

    /// Positional parameters, optional only while nothing required follows
    fn positional_params(&self, fields: &[Field]) -> String {
        let mut trailing_optional = true;
        let mut decls: Vec<String> = fields
            .iter()
            .rev()
            .map(|f| {
                trailing_optional &= matches!(f.ty, ApiType::Optional { .. });
                self.param_decl(f, trailing_optional)
            })
            .collect();
        decls.reverse();
        decls.join(", ")
    }

    /// Declarations of the generated call surface
    fn call_params(&self, module: &Module, func: &Function) -> Vec<String> {
        let info = function_info(self.api, module, func);
        let mut decls = Vec::new();
        if let Some(params) = info.params {
            decls.push(self.param_decl(params, true));
        }
        if let Some(obj) = info.app_object {
            decls.push(format!("obj: {}", Self::app_object_interface_name(obj)));
        } else if info.has_response_handler {
            decls.push("responseHandler?: ResponseHandler".to_string());
        }
        decls
    }

    /// Response handler forwarding app requests to an app object dispatcher
    fn app_object_handler(&self, obj: &AppObject) -> String {
        let dispatch = format!("dispatch{}", Self::app_object_interface_name(obj));
        format!(
            "(params: any, responseType: number) => {{
            if (responseType === {request}) {{
                {dispatch}(obj, params.request_data, params.app_request_id, this.client);
            }} else if (responseType === {notify}) {{
                {dispatch}(obj, params, null, this.client);
            }}
        }}",
            request = APP_REQUEST_RESPONSE,
            notify = APP_NOTIFY_RESPONSE,
            dispatch = dispatch,
        )
    }

    /// One factory per variant of a module level enum of types
    pub fn variant_constructors(&self, ty: &Field) -> String {
        let ApiType::EnumOfTypes { enum_types } = &ty.ty else {
            return String::new();
        };

        let mut ts = String::new();
        for variant in enum_types {
            let name = format!("{}{}", lower_first(&ty.name), variant.name);
            match variant_payload(self.api, variant) {
                VariantPayload::Unit => {
                    ts.push_str(&format!(
                        "export const {}: {} = '{}';\n\n",
                        name, ty.name, variant.name
                    ));
                }
                VariantPayload::Fields(fields) => {
                    let members: String = fields
                        .iter()
                        .map(|f| format!("        {},\n", f.name))
                        .collect();
                    ts.push_str(&format!(
                        "export function {}({}): {} {{\n    return {{\n        type: '{}',\n{}    }};\n}}\n\n",
                        name,
                        self.positional_params(&fields),
                        ty.name,
                        variant.name,
                        members
                    ));
                }
                VariantPayload::External(target) => {
                    ts.push_str(&format!(
                        "export function {}(value: {}): {} {{\n    return {{\n        type: '{}',\n        ...value,\n    }};\n}}\n\n",
                        name, target.name, ty.name, variant.name
                    ));
                }
                VariantPayload::Value(value) => {
                    ts.push_str(&format!(
                        "export function {}(value: {}): {} {{\n    return {{\n        type: '{}',\n        value,\n    }};\n}}\n\n",
                        name,
                        self.render_type(value, ""),
                        ty.name,
                        variant.name
                    ));
                }
            }
        }
        ts
    }
}

impl Generator for TsCode<'_> {
    fn api(&self) -> &ResolvedApi {
        self.api
    }

    fn language(&self) -> &'static str {
        "ts"
    }

    fn render_type(&self, ty: &ApiType, indent: &str) -> String {
        match ty {
            ApiType::Ref { ref_name, .. } => type_mapper::ref_to_typescript(ref_name),
            ApiType::Optional { optional_inner } => {
                format!("{} | null", self.render_type(optional_inner, indent))
            }
            ApiType::Array { array_item } => type_mapper::array_of(&self.render_type(array_item, indent)),
            ApiType::Struct { struct_fields } => match ty.tuple_inner() {
                Some(inner) => self.render_type(&inner.ty, indent),
                None if struct_fields.is_empty() => "{}".to_string(),
                None => format!(
                    "{{\n{}\n{}}}",
                    self.fields(struct_fields, &format!("{}{}", indent, INDENT)),
                    indent
                ),
            },
            ApiType::EnumOfTypes { enum_types } => enum_types
                .iter()
                .map(|v| self.render_variant(v, indent))
                .collect::<Vec<_>>()
                .join(" | "),
            ApiType::EnumOfConsts { enum_consts } => enum_consts
                .iter()
                .map(type_mapper::const_literal)
                .collect::<Vec<_>>()
                .join(" | "),
            ApiType::Generic {
                generic_name,
                generic_args,
            } => {
                if crate::known_types::is_dynamic_generic(generic_name) {
                    "any".to_string()
                } else {
                    let args: Vec<_> = generic_args
                        .iter()
                        .map(|a| self.render_type(a, indent))
                        .collect();
                    format!("{}<{}>", generic_name, args.join(", "))
                }
            }
            scalar => type_mapper::scalar_to_typescript(scalar)
                .unwrap_or("any")
                .to_string(),
        }
    }

    fn render_type_def(&self, ty: &Field) -> String {
        let doc = self.js_doc(&ty.summary, &ty.description, "");
        match &ty.ty {
            ApiType::EnumOfConsts { enum_consts } if type_mapper::is_enumerable(enum_consts) => {
                let members: Vec<String> = enum_consts
                    .iter()
                    .map(|c| {
                        format!(
                            "{}{}{}",
                            self.js_doc(&c.summary, &c.description, INDENT),
                            INDENT,
                            self.render_const(c)
                        )
                    })
                    .collect();
                format!("{}export enum {} {{\n{}\n}}\n\n", doc, ty.name, members.join(",\n"))
            }
            other => format!(
                "{}export type {} = {};\n\n",
                doc,
                ty.name,
                self.render_type(other, "")
            ),
        }
    }

    fn render_field(&self, field: &Field, indent: &str) -> String {
        let (name, ty) = match &field.ty {
            ApiType::Optional { optional_inner } => (format!("{}?", field.name), optional_inner.as_ref()),
            ty => (field.name.clone(), ty),
        };
        format!(
            "{}{}{}: {}",
            self.js_doc(&field.summary, &field.description, indent),
            indent,
            name,
            self.render_type(ty, indent)
        )
    }

    fn render_variant(&self, variant: &Field, indent: &str) -> String {
        let inner = format!("{}{}", indent, INDENT);
        match variant_payload(self.api, variant) {
            VariantPayload::Unit => format!("'{}'", variant.name),
            VariantPayload::Fields(fields) => {
                let mut members = vec![format!("{}type: '{}'", inner, variant.name)];
                members.extend(fields.iter().map(|f| self.render_field(f, &inner)));
                format!("{{\n{}\n{}}}", members.join(",\n"), indent)
            }
            VariantPayload::External(target) => format!(
                "({{\n{}type: '{}'\n{}}} & {})",
                inner, variant.name, indent, target.name
            ),
            VariantPayload::Value(ty) => format!(
                "{{\n{}type: '{}',\n{}value: {}\n{}}}",
                inner,
                variant.name,
                inner,
                self.render_type(ty, &inner),
                indent
            ),
        }
    }

    fn render_const(&self, value: &Const) -> String {
        match &value.value {
            ConstValue::None => format!("{} = '{}'", value.name, value.name),
            ConstValue::String { value: literal } => format!("{} = '{}'", value.name, literal),
            ConstValue::Number { value: literal } | ConstValue::Bool { value: literal } => {
                format!("{} = {}", value.name, literal)
            }
        }
    }

    fn render_function_signature(&self, module: &Module, func: &Function) -> String {
        let name = to_camel_case(&func.name);
        let result = self.render_type(&func.result, "");
        let decls = self.call_params(module, func);
        if decls.is_empty() {
            return format!("function {}(): Promise<{}>;\n", name, result);
        }
        let params: String = decls.iter().map(|d| format!("{}{},\n", INDENT, d)).collect();
        format!("function {}(\n{}): Promise<{}>;\n", name, params, result)
    }

    fn render_function_body(&self, module: &Module, func: &Function) -> String {
        let info = function_info(self.api, module, func);
        let name = to_camel_case(&func.name);
        let result = self.render_type(&func.result, INDENT);

        let callback = match info.app_object {
            Some(obj) => Some(self.app_object_handler(obj)),
            None if info.has_response_handler => Some("responseHandler".to_string()),
            None => None,
        };

        let mut call = vec![format!("'{}.{}'", module.name, func.name)];
        match (info.params, &callback) {
            (Some(params), _) => call.push(params.name.clone()),
            (None, Some(_)) => call.push("undefined".to_string()),
            (None, None) => {}
        }
        call.extend(callback);

        format!(
            "\n    {}({}): Promise<{}> {{\n        return this.client.request({});\n    }}\n",
            name,
            self.call_params(module, func).join(", "),
            result,
            call.join(", ")
        )
    }

    fn render_callback_interface(&self, obj: &AppObject) -> String {
        let interface = Self::app_object_interface_name(obj);

        let mut ts = self.js_doc(&obj.module.summary, &obj.module.description, "");
        ts.push_str(&format!("export interface {} {{\n", interface));
        for func in &obj.module.functions {
            let params: Vec<String> = func
                .params
                .iter()
                .map(|p| format!("{}: {}", p.name, self.render_type(&p.ty, INDENT)))
                .collect();
            let result = if func.is_notification {
                "void".to_string()
            } else {
                format!("Promise<{}>", self.render_type(&func.result, INDENT))
            };
            ts.push_str(&self.js_doc(&func.summary, &func.description, INDENT));
            ts.push_str(&format!("{}{}({}): {},\n", INDENT, func.name, params.join(", "), result));
        }
        ts.push_str("}\n\n");

        let mut cases = String::new();
        for (func, variant) in obj.module.functions.iter().zip(&obj.variants) {
            let args = if func.params.is_empty() { "" } else { "params" };
            cases.push_str(&format!("            case '{}':\n", variant));
            if func.is_notification {
                cases.push_str(&format!("                obj.{}({});\n                return;\n", func.name, args));
            } else {
                cases.push_str(&format!(
                    "                result = await obj.{}({});\n                break;\n",
                    func.name, args
                ));
            }
        }

        ts.push_str(&format!(
            "async function dispatch{interface}(obj: {interface}, params: {params}, app_request_id: number | null, client: IClient) {{
    try {{
        let result: any = {{}};
        const kind = typeof params === 'string' ? params : params.type;
        switch (kind) {{
{cases}        }}
        client.resolve_app_request(app_request_id, {{ type: kind, ...result }});
    }}
    catch (error) {{
        client.reject_app_request(app_request_id, error);
    }}
}}

",
            interface = interface,
            params = bare_name(&obj.params_type),
            cases = cases,
        ));
        ts
    }

    fn render_module(&self, module: &Module) -> String {
        let mut ts = format!("// {} module\n\n", module.name);

        for ty in &module.types {
            ts.push_str(&self.render_type_def(ty));
            ts.push_str(&self.variant_constructors(ty));
        }

        for obj in self.api.app_objects_of(module) {
            ts.push_str(&self.render_callback_interface(obj));
        }

        ts.push_str(&format!(
            "export class {} {{\n    client: IClient;\n\n    constructor(client: IClient) {{\n        this.client = client;\n    }}\n",
            self.ctx.format_module_class(&module.name)
        ));
        for func in &module.functions {
            ts.push_str(&self.render_function_body(module, func));
        }
        ts.push_str("}\n\n");

        ts
    }

    fn render_all(&self) -> String {
        let modules: String = self
            .api
            .modules()
            .iter()
            .map(|m| self.render_module(m))
            .collect();
        format!("{}\n{}", MODULES_HEADER, modules)
    }

    fn files(&self) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        files.insert(format!("modules.{}", self.language()), self.render_all());
        files
    }
}

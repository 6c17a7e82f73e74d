//! Integration tests for resolution and rendering of a complete schema

use std::fs;

use sdk_codegen::error::SchemaError;
use sdk_codegen::generator::{generate, Backend, GeneratorContext};
use sdk_codegen::resolver::{resolve_json, ResolvedApi};

use super::fixture;

fn load_fixture() -> ResolvedApi {
    let json = fs::read_to_string(fixture("api.json")).unwrap();
    resolve_json(&json).unwrap()
}

fn ts_output(api: &ResolvedApi) -> String {
    let files = generate(api, Backend::Ts, &GeneratorContext::default());
    files["modules.ts"].clone()
}

#[test]
fn test_fixture_resolves() {
    let api = load_fixture();

    assert_eq!(api.version(), "1.2.0");
    assert_eq!(api.modules().len(), 4);
    assert_eq!(api.app_objects().len(), 1);

    let area = api.module("geo").unwrap().function("area").unwrap();
    assert_eq!(area.params[1].ty.ref_name(), Some("geo.ParamsOfArea"));
}

#[test]
fn test_ts_module_functions() {
    let api = load_fixture();
    let ts = ts_output(&api);

    assert!(ts.contains("export class FooModule {"));
    assert!(ts.contains("return this.client.request('foo.bar', params);"));

    assert!(ts.contains("version(): Promise<ResultOfVersion> {"));
    assert!(ts.contains("return this.client.request('client.version');"));
    assert!(ts.contains("getApiReference(): Promise<any> {"));

    assert!(ts.contains("area(params: ParamsOfArea): Promise<number> {"));
    assert!(ts.contains(
        "query(params: ParamsOfQuery, responseHandler?: ResponseHandler): Promise<any[]> {"
    ));
}

#[test]
fn test_ts_types_and_constructors() {
    let api = load_fixture();
    let ts = ts_output(&api);

    assert!(ts.contains(
        "export enum ClientErrorCode {\n    NotImplemented = 1,\n    InvalidHex = 2\n}"
    ));
    assert!(ts.contains(
        "export type Shape = {\n    type: 'Circle',\n    radius: number\n} | 'Point';"
    ));
    assert!(ts.contains("export function shapeCircle(radius: number): Shape {"));
    assert!(ts.contains("export const shapePoint: Shape = 'Point';"));
    assert!(ts.contains("export type ParamsOfArea = {\n    shape: Shape,\n    precision?: number\n};"));
}

#[test]
fn test_ts_app_object() {
    let api = load_fixture();
    let ts = ts_output(&api);

    assert!(ts.contains("export interface AppSubscribe {"));
    assert!(ts.contains("    ok(params: ParamsOfSubscribeOkVariant): Promise<void>,"));
    assert!(ts.contains("    closed(): void,"));
    assert!(ts.contains("subscribe(obj: AppSubscribe): Promise<void> {"));
    assert_eq!(ts.matches("async function dispatchAppSubscribe(").count(), 1);
}

#[test]
fn test_ts_modules_in_order() {
    let api = load_fixture();
    let ts = ts_output(&api);

    let positions: Vec<usize> = ["// client module", "// foo module", "// geo module", "// net module"]
        .iter()
        .map(|marker| ts.find(marker).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_docs_pages() {
    let api = load_fixture();
    let files = generate(&api, Backend::Docs, &GeneratorContext::default());

    assert_eq!(
        files.keys().collect::<Vec<_>>(),
        vec!["mod_client.md", "mod_foo.md", "mod_geo.md", "mod_net.md", "modules.md"]
    );

    let foo = &files["mod_foo.md"];
    assert!(foo.contains("## bar\n"));
    assert!(foo.contains("### Parameters\n- `x`: _number_\n"));

    let geo = &files["mod_geo.md"];
    assert!(geo.starts_with(
        "# Module geo\n\nGeometry helpers.\n\nShapes are tagged by their `type` field.\n\n"
    ));
    assert_eq!(geo.matches("When _type_ is").count(), 2);
    assert!(geo.contains("- `shape`: _[Shape](mod_geo.md#Shape)_\n"));

    let net = &files["mod_net.md"];
    assert!(net.contains("- `filter`?: _any_\n"));
    assert!(net.contains("# Module Subscribe\n"));

    let index = &files["modules.md"];
    assert!(index.contains("## [client](mod_client.md) – Core library functions\n\n"));
    assert!(index.contains("[version](mod_client.md#version) – Returns library version\n\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let first = load_fixture();
    let second = load_fixture();
    assert_eq!(first, second);

    for backend in Backend::ALL {
        let ctx = GeneratorContext::default();
        assert_eq!(generate(&first, backend, &ctx), generate(&second, backend, &ctx));
    }
}

#[test]
fn test_unresolved_reference() {
    let json = fs::read_to_string(fixture("unresolved.json")).unwrap();

    match resolve_json(&json) {
        Err(SchemaError::UnresolvedRef { name, context }) => {
            assert_eq!(name, "Undefined");
            assert_eq!(context, "foo.ParamsOfBar");
        }
        other => panic!("Expected UnresolvedRef, got {:?}", other),
    }
}

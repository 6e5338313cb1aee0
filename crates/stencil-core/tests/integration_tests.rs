//! Integration tests for stencil-core's pure pipeline: names in, text out.

use stencil_core::domain::{
    ArtifactKind, BlockAnchor, BlockDocument, EntryStyle, NameDeriver, PackageManifest,
    RenamePlan, RewriteSpec, ensure_import,
    templates::{env_field, import_line, metadata_entry, registry_entry, render_client},
};
use std::path::Path;

const TOOLS_TS: &str = r#"import { domainNameService } from "../domain/domain-name/services/domain-name.service";
import { GetDataRequestDto } from "../domain/domain-name/dtos/getData.dto";

export const tools = {
  "get-data": (args: GetDataRequestDto) => domainNameService.getData(args)
};
"#;

#[test]
fn derived_names_for_an_http_client() {
    let names = NameDeriver::new().derive("weather", ArtifactKind::HttpClient, "open-meteo", "getForecast");

    assert_eq!(names.class_name, "OpenMeteoHttpClient");
    assert_eq!(names.instance_name, "openMeteoHttpClient");
    assert_eq!(names.file_name, "open-meteo.http.client.ts");
    assert_eq!(names.env_var, "OPEN_METEO_API_URL");
    assert_eq!(names.dto.request, "GetForecastRequestDto");
    assert_eq!(names.dto.file_name, "getForecast.dto.ts");

    let source = render_client(&names);
    assert!(source.contains("export class OpenMeteoHttpClient"));
    assert!(source.contains("process.env.OPEN_METEO_API_URL"));
    assert!(source.contains("async getForecast("));
}

#[test]
fn registering_a_tool_keeps_the_registry_valid() {
    let tool = NameDeriver::new().tool("get forecast", "");
    let anchor = BlockAnchor::exported_object("tools").unwrap();

    let with_import = ensure_import(
        TOOLS_TS,
        &import_line(
            &[&tool.dto.request],
            "../domain/weather/dtos/getForecast.dto",
        ),
    )
    .unwrap();
    let doc = BlockDocument::locate(&with_import, &anchor).unwrap();
    assert!(doc.has_key("get-data"));
    assert!(!doc.has_key(&tool.key));

    let out = doc.insert_entry(
        &registry_entry(&tool, "weatherService"),
        EntryStyle { trailing_comma: true },
    );

    assert!(out.contains(
        "  \"get-data\": (args: GetDataRequestDto) => domainNameService.getData(args),\n"
    ));
    assert!(out.contains(
        "  \"get-forecast\": (args: GetForecastRequestDto) => weatherService.getForecast(args),\n};"
    ));
    let imports: Vec<_> = out.lines().filter(|l| l.starts_with("import ")).collect();
    assert_eq!(imports.len(), 3);
    assert!(imports[2].contains("getForecast.dto"));
}

#[test]
fn env_and_metadata_entries_land_inside_their_objects() {
    let tool = NameDeriver::new().tool("getForecast", "Forecast for a \"city\"");

    let env = "export const env = {\n  GET_DATA_ENABLED: process.env.GET_DATA_ENABLED !== \"false\",\n};\n";
    let env = BlockDocument::locate(env, &BlockAnchor::exported_object("env").unwrap())
        .unwrap()
        .insert_entry(&env_field(&tool.env_var), EntryStyle { trailing_comma: true });
    assert!(env.ends_with(
        "  GET_FORECAST_ENABLED: process.env.GET_FORECAST_ENABLED !== \"false\",\n};\n"
    ));

    let metadata = "export const toolsMetadata: Record<string, ToolMeta> = {};\n";
    let metadata =
        BlockDocument::locate(metadata, &BlockAnchor::exported_object("toolsMetadata").unwrap())
            .unwrap()
            .insert_entry(&metadata_entry(&tool), EntryStyle { trailing_comma: true });
    assert!(metadata.contains(r#"description: "Forecast for a \"city\"""#));
    assert!(metadata.trim_end().ends_with("};"));
}

#[test]
fn init_rename_is_planned_directory_first() {
    let plan = RenamePlan::new()
        .rename_dir("/p/src/domain/domain-name", "/p/src/domain/orders")
        .rename_file(
            "/p/src/domain/domain-name/services/domain-name.service.ts",
            "/p/src/domain/domain-name/services/orders.service.ts",
        );

    let steps = plan.steps();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].to, Path::new("/p/src/domain/orders"));
    assert_eq!(
        steps[1].from,
        Path::new("/p/src/domain/orders/services/domain-name.service.ts")
    );
    assert_eq!(
        plan.resolve(Path::new(
            "/p/src/domain/domain-name/services/domain-name.service.ts"
        )),
        Path::new("/p/src/domain/orders/services/orders.service.ts")
    );
}

#[test]
fn rewrite_spec_applies_rules_in_order() {
    let spec = RewriteSpec::new()
        .literal("DomainNameService", "OrdersService")
        .word("getData", "listOrders");

    let out = spec.apply("class DomainNameService { getData() {} getDataAll() {} }");
    assert!(out.changed);
    assert_eq!(
        out.text,
        "class OrdersService { listOrders() {} getDataAll() {} }"
    );
}

#[test]
fn manifest_self_destruct_drops_only_the_init_script() {
    let mut manifest = PackageManifest::parse(
        r#"{"name":"template","scripts":{"build":"tsc","init-project":"tsx scripts/init-project.ts"}}"#,
    )
    .unwrap();
    manifest.set_name("orders-mcp");
    assert!(manifest.remove_script("init-project"));
    assert!(!manifest.remove_script("init-project"));

    let text = manifest.to_pretty_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["name"], "orders-mcp");
    assert_eq!(value["scripts"]["build"], "tsc");
    assert!(value["scripts"].get("init-project").is_none());
}

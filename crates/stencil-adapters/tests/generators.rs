//! End-to-end generator runs against an in-memory template project.

use stencil_adapters::{MemoryFilesystem, ScriptedPrompt};
use stencil_core::{
    application::{GeneratorKind, ProjectLayout, ScaffoldReport, ScaffoldService},
    domain::{DomainError, RenameKind},
    error::{ErrorCategory, StencilError},
};

const ROOT: &str = "/p";

const MANIFEST: &str = r#"{
  "name": "mcp-template",
  "version": "0.1.0",
  "description": "Template",
  "scripts": {
    "build": "tsc",
    "init-project": "tsx scripts/init-project.ts"
  }
}
"#;

const SERVICE: &str = r#"import { GetDataRequestDto, GetDataResponseDto } from "../dtos/getData.dto";

export class DomainNameService {
  async getData(request: GetDataRequestDto): Promise<GetDataResponseDto | null> {
    return null;
  }
}

export const domainNameService = new DomainNameService();
"#;

const DTO: &str = "export interface GetDataRequestDto {}\n\nexport interface GetDataResponseDto {}\n";

const ENV: &str = r#"export const env = {
  GET_DATA_ENABLED: process.env.GET_DATA_ENABLED !== "false"
};
"#;

const METADATA: &str = r#"export const toolsMetadata = {
  "get-data": { name: "get-data", description: "Fetch data" },
};
"#;

const TOOLS: &str = r#"import { domainNameService } from "../domain/domain-name/services/domain-name.service";
import { GetDataRequestDto } from "../domain/domain-name/dtos/getData.dto";

export const tools = {
  "get-data": (args: GetDataRequestDto) => domainNameService.getData(args)
};
"#;

fn path(rel: &str) -> String {
    format!("{ROOT}/{rel}")
}

fn pristine() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file(path("package.json"), MANIFEST)
        .with_file(path("scripts/init-project.ts"), "// init\n")
        .with_file(
            path("src/domain/domain-name/services/domain-name.service.ts"),
            SERVICE,
        )
        .with_file(path("src/domain/domain-name/dtos/getData.dto.ts"), DTO)
        .with_file(path("src/env.ts"), ENV)
        .with_file(path("src/tools.metadata.ts"), METADATA)
        .with_file(path("src/mcp/tools.ts"), TOOLS)
}

fn run(
    fs: &MemoryFilesystem,
    kind: GeneratorKind,
    answers: &[&str],
) -> Result<ScaffoldReport, StencilError> {
    let service = ScaffoldService::new(Box::new(fs.clone()), ProjectLayout::new(ROOT));
    let mut prompt = ScriptedPrompt::new(answers.iter().copied());
    service.run(kind, &mut prompt)
}

fn read(fs: &MemoryFilesystem, rel: &str) -> String {
    fs.read_file(path(rel))
        .unwrap_or_else(|| panic!("{rel} should exist"))
}

fn initialised() -> MemoryFilesystem {
    let fs = pristine();
    run(
        &fs,
        GeneratorKind::InitProject,
        &["Orders MCP", "", "order-system", "createOrder"],
    )
    .unwrap();
    fs
}

#[test]
fn init_project_renames_rewrites_and_removes_itself() {
    let fs = pristine();
    let report = run(
        &fs,
        GeneratorKind::InitProject,
        &["Orders MCP", "", "order-system", "createOrder"],
    )
    .unwrap();

    // Directory first, then the files inside it at their new location.
    assert_eq!(report.renamed.len(), 3);
    assert_eq!(report.renamed[0].kind, RenameKind::Directory);
    assert_eq!(report.renamed[0].to, "src/domain/order-system");
    assert_eq!(
        report.renamed[1].from,
        "src/domain/order-system/services/domain-name.service.ts"
    );
    assert_eq!(
        report.renamed[1].to,
        "src/domain/order-system/services/order-system.service.ts"
    );

    let service = read(&fs, "src/domain/order-system/services/order-system.service.ts");
    assert!(service.contains("export class OrderSystemService {"));
    assert!(service.contains("async createOrder(request: CreateOrderRequestDto)"));
    assert!(service.contains("from \"../dtos/createOrder.dto\""));
    assert!(service.contains("export const orderSystemService = new OrderSystemService();"));

    let dto = read(&fs, "src/domain/order-system/dtos/createOrder.dto.ts");
    assert!(dto.contains("CreateOrderResponseDto"));

    let tools = read(&fs, "src/mcp/tools.ts");
    assert!(tools.contains(
        "import { orderSystemService } from \"../domain/order-system/services/order-system.service\";"
    ));
    assert!(tools.contains(
        "\"create-order\": (args: CreateOrderRequestDto) => orderSystemService.createOrder(args)"
    ));
    assert!(read(&fs, "src/tools.metadata.ts").contains("\"create-order\": { name: \"create-order\""));
    assert!(read(&fs, "src/env.ts").contains("CREATE_ORDER_ENABLED: process.env.CREATE_ORDER_ENABLED"));

    let manifest: serde_json::Value = serde_json::from_str(&read(&fs, "package.json")).unwrap();
    assert_eq!(manifest["name"], "orders-mcp");
    assert_eq!(manifest["description"], "orders-mcp MCP server");
    assert_eq!(manifest["scripts"]["build"], "tsc");
    assert!(manifest["scripts"].get("init-project").is_none());

    assert!(fs.read_file(path("scripts/init-project.ts")).is_none());
    assert_eq!(report.deleted, vec!["scripts/init-project.ts"]);
    assert!(
        fs.list_files()
            .iter()
            .all(|p| !p.to_string_lossy().contains("domain-name"))
    );
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn init_project_cannot_run_twice() {
    let fs = initialised();
    let err = run(
        &fs,
        GeneratorKind::InitProject,
        &["again", "", "billing", ""],
    )
    .unwrap_err();

    assert!(matches!(err, StencilError::Application(_)));
    assert!(err.to_string().contains("src/domain/domain-name not found"));
}

#[test]
fn new_client_creates_http_client_dto_and_api_utils() {
    let fs = initialised();
    let report = run(
        &fs,
        GeneratorKind::NewClient,
        &["1", "1", "open-meteo", "getForecast"],
    )
    .unwrap();

    let client = read(
        &fs,
        "src/domain/order-system/clients/open-meteo.http.client.ts",
    );
    assert!(client.contains("export class OpenMeteoHttpClient {"));
    assert!(client.contains("process.env.OPEN_METEO_API_URL"));
    assert!(client.contains("async getForecast(request: GetForecastRequestDto)"));
    assert!(client.contains("/get-forecast`"));

    assert!(read(&fs, "src/domain/order-system/dtos/getForecast.dto.ts")
        .contains("GetForecastRequestDto"));
    assert!(read(&fs, "src/domain/order-system/utils/api.utils.ts").contains("buildHeaders"));

    assert!(report.created.contains(&"src/domain/order-system/clients/".to_string()));
    assert!(report
        .created
        .contains(&"src/domain/order-system/clients/open-meteo.http.client.ts".to_string()));
}

#[test]
fn out_of_range_selection_is_fatal_and_writes_nothing() {
    let fs = initialised();
    let before = fs.list_files();

    let err = run(&fs, GeneratorKind::NewClient, &["99"]).unwrap_err();

    assert!(matches!(
        err,
        StencilError::Domain(DomainError::InvalidSelection { .. })
    ));
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(fs.list_files(), before);
}

#[test]
fn new_tool_registers_everywhere_then_rejects_duplicates() {
    let fs = initialised();
    let report = run(&fs, GeneratorKind::NewTool, &["1", "1", "getForecast", ""]).unwrap();

    let env = read(&fs, "src/env.ts");
    assert!(env.contains("CREATE_ORDER_ENABLED !== \"false\",\n"));
    assert!(env.contains("  GET_FORECAST_ENABLED: process.env.GET_FORECAST_ENABLED !== \"false\",\n};"));

    let metadata = read(&fs, "src/tools.metadata.ts");
    assert!(metadata.contains(
        "  \"get-forecast\": { name: \"get-forecast\", description: \"TODO: describe get-forecast\" },\n};"
    ));
    assert!(!metadata.contains(",,"));

    let tools = read(&fs, "src/mcp/tools.ts");
    assert!(tools.contains("orderSystemService.createOrder(args),\n"));
    assert!(tools.contains(
        "  \"get-forecast\": (args: GetForecastRequestDto) => orderSystemService.getForecast(args),\n};"
    ));
    assert!(tools.contains(
        "import { GetForecastRequestDto } from \"../domain/order-system/dtos/getForecast.dto\";"
    ));
    assert_eq!(tools.matches("import { orderSystemService }").count(), 1);

    let service = read(&fs, "src/domain/order-system/services/order-system.service.ts");
    assert!(service.contains("async getForecast(request: GetForecastRequestDto)"));
    assert!(service.contains(
        "import { GetForecastRequestDto, GetForecastResponseDto } from \"../dtos/getForecast.dto\";"
    ));
    assert!(report.created.contains(&"src/domain/order-system/dtos/getForecast.dto.ts".to_string()));

    let snapshot: Vec<_> = fs
        .list_files()
        .into_iter()
        .map(|p| fs.read_file(&p))
        .collect();
    let err = run(&fs, GeneratorKind::NewTool, &["1", "1", "get-forecast", ""]).unwrap_err();
    assert_eq!(err.to_string(), "Tool 'get-forecast' is already registered");
    let after: Vec<_> = fs
        .list_files()
        .into_iter()
        .map(|p| fs.read_file(&p))
        .collect();
    assert_eq!(snapshot, after);
}

#[test]
fn tool_registered_on_one_line_is_still_a_duplicate() {
    let fs = MemoryFilesystem::new()
        .with_file(
            path("src/domain/orders/services/orders.service.ts"),
            "export class OrdersService {\n}\n",
        )
        .with_file(path("src/tools.metadata.ts"), "export const toolsMetadata = {};\n")
        .with_file(
            path("src/mcp/tools.ts"),
            "export const tools = { ping: () => 1, \"list-orders\": (args) => ordersService.listOrders(args) };\n",
        );
    let before: Vec<_> = fs
        .list_files()
        .into_iter()
        .map(|p| fs.read_file(&p))
        .collect();

    let err = run(&fs, GeneratorKind::NewTool, &["1", "1", "listOrders", ""]).unwrap_err();

    assert!(matches!(
        err,
        StencilError::Domain(DomainError::ToolAlreadyRegistered { .. })
    ));
    let after: Vec<_> = fs
        .list_files()
        .into_iter()
        .map(|p| fs.read_file(&p))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn new_domain_with_both_clients() {
    let fs = initialised();
    let report = run(&fs, GeneratorKind::NewDomain, &["billing", "", "y", "y"]).unwrap();

    for dir in ["services", "clients", "dtos", "utils"] {
        assert!(report.created.contains(&format!("src/domain/billing/{dir}/")));
    }

    let service = read(&fs, "src/domain/billing/services/billing.service.ts");
    assert!(service.contains("import { BillingHttpClient } from \"../clients/billing.http.client\";"));
    assert!(service.contains("private readonly httpClient: BillingHttpClient,"));
    assert!(service.contains("private readonly dbClient: BillingDbClient,"));
    assert!(service.contains(
        "export const billingService = new BillingService(new BillingHttpClient(), new BillingDbClient());"
    ));

    assert!(read(&fs, "src/domain/billing/clients/billing.http.client.ts").contains("async getData("));
    assert!(read(&fs, "src/domain/billing/clients/billing.db.client.ts")
        .contains("process.env.BILLING_DATABASE_URL"));
    assert!(fs.read_file(path("src/domain/billing/utils/api.utils.ts")).is_some());

    let err = run(&fs, GeneratorKind::NewDomain, &["Billing", "", "n", "n"]).unwrap_err();
    assert_eq!(err.to_string(), "Domain 'billing' already exists");
}

#[test]
fn new_service_wires_and_extends_an_existing_client() {
    let fs = initialised();
    run(&fs, GeneratorKind::NewDomain, &["billing", "", "y", "n"]).unwrap();

    // Domains are listed by name: billing, order-system.
    let mut prompt = ScriptedPrompt::new(["1", "invoices", "listInvoices", "1"]);
    let service = ScaffoldService::new(Box::new(fs.clone()), ProjectLayout::new(ROOT));
    let report = service.run(GeneratorKind::NewService, &mut prompt).unwrap();

    assert!(prompt.shown()[0].contains("  1) billing (BillingService)"));
    assert!(prompt.shown()[1].contains("  1) billing (BillingHttpClient)"));

    let invoices = read(&fs, "src/domain/billing/services/invoices.service.ts");
    assert!(invoices.contains("export class InvoicesService {"));
    assert!(invoices.contains("return this.httpClient.listInvoices(request);"));
    assert!(invoices.contains("new InvoicesService(new BillingHttpClient())"));

    let client = read(&fs, "src/domain/billing/clients/billing.http.client.ts");
    assert!(client.contains("async getData("));
    assert!(client.contains("  async listInvoices(request: ListInvoicesRequestDto)"));
    assert!(client.contains(
        "import { ListInvoicesRequestDto, ListInvoicesResponseDto } from \"../dtos/listInvoices.dto\";"
    ));
    assert!(report
        .updated
        .contains(&"src/domain/billing/clients/billing.http.client.ts".to_string()));
}

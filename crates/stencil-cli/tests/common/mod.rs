//! Pristine template project used by the CLI tests.

use std::fs;
use std::path::Path;

use assert_cmd::Command;

pub fn seed_template(root: &Path) {
    let files = [
        (
            "package.json",
            "{\n  \"name\": \"mcp-template\",\n  \"description\": \"Template\",\n  \"scripts\": {\n    \"build\": \"tsc\",\n    \"init-project\": \"tsx scripts/init-project.ts\"\n  }\n}\n",
        ),
        ("scripts/init-project.ts", "// init\n"),
        (
            "src/domain/domain-name/services/domain-name.service.ts",
            "import { GetDataRequestDto, GetDataResponseDto } from \"../dtos/getData.dto\";\n\nexport class DomainNameService {\n  async getData(request: GetDataRequestDto): Promise<GetDataResponseDto | null> {\n    return null;\n  }\n}\n\nexport const domainNameService = new DomainNameService();\n",
        ),
        (
            "src/domain/domain-name/dtos/getData.dto.ts",
            "export interface GetDataRequestDto {}\n\nexport interface GetDataResponseDto {}\n",
        ),
        (
            "src/env.ts",
            "export const env = {\n  GET_DATA_ENABLED: process.env.GET_DATA_ENABLED !== \"false\",\n};\n",
        ),
        (
            "src/tools.metadata.ts",
            "export const toolsMetadata = {\n  \"get-data\": { name: \"get-data\", description: \"Fetch data\" },\n};\n",
        ),
        (
            "src/mcp/tools.ts",
            "import { domainNameService } from \"../domain/domain-name/services/domain-name.service\";\nimport { GetDataRequestDto } from \"../domain/domain-name/dtos/getData.dto\";\n\nexport const tools = {\n  \"get-data\": (args: GetDataRequestDto) => domainNameService.getData(args),\n};\n",
        ),
    ];

    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// `stencil -C <root>` with colour and logging noise turned off.
pub fn stencil(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.env("NO_COLOR", "true")
        .env_remove("RUST_LOG")
        .arg("-C")
        .arg(root);
    cmd
}

//! new-tool: expose a service method as an MCP tool.
//!
//! Touches five files: the DTO, the service class, `src/env.ts`,
//! `src/tools.metadata.ts`, and the `src/mcp/tools.ts` registry. A tool key
//! already present in either registry is rejected before any of them is
//! written.

use tracing::{info, instrument};

use crate::{
    application::{generators::dto_import_for, session::GeneratorSession},
    domain::{
        BlockAnchor, DomainError, EntityKind, EntryStyle, InputRole, NameDeriver, to_kebab_case,
        naming::instance_name_for,
        templates::{
            env_field, import_line, metadata_entry, registry_entry, render_dto,
            service_method_stub,
        },
    },
    error::StencilResult,
};

const ENV_OBJECT: &str = "env";
const METADATA_OBJECT: &str = "toolsMetadata";
const REGISTRY_OBJECT: &str = "tools";

#[instrument(skip_all)]
pub(crate) fn run(session: &mut GeneratorSession<'_>) -> StencilResult<()> {
    let layout = session.layout();
    let discovery = session.discovery();

    let domains = discovery.list_domains()?;
    let domain = session
        .select(EntityKind::Domain, &domains, &layout.domains_dir())?
        .into_entity()
        .dir_name;

    let services = discovery.list_services(&domain)?;
    let service = session
        .select(EntityKind::Service, &services, &layout.services_dir(&domain))?
        .into_entity();

    let tool = session.ask(InputRole::ToolName, "Tool name")?;
    let tool = tool.require()?.to_string();
    let default_description = format!("TODO: describe {}", to_kebab_case(&tool));
    let description = session.ask_with_default(
        InputRole::ToolDescription,
        "Tool description",
        &default_description,
    )?;
    let tool = NameDeriver::new().tool(&tool, description.as_str());

    // Validate
    let metadata_anchor = BlockAnchor::exported_object(METADATA_OBJECT)?;
    let registry_anchor = BlockAnchor::exported_object(REGISTRY_OBJECT)?;
    let rewriter = session.rewriter();
    let registered = rewriter
        .inspect(&layout.tools_metadata(), &metadata_anchor, |doc| {
            doc.has_key(&tool.key)
        })?
        .unwrap_or(false)
        || rewriter
            .inspect(&layout.tools_registry(), &registry_anchor, |doc| {
                doc.has_key(&tool.key)
            })?
            .unwrap_or(false);
    if registered {
        return Err(DomainError::ToolAlreadyRegistered { name: tool.key }.into());
    }

    info!(
        tool = %tool.key,
        service = %service.class_name,
        method = %tool.method_name,
        "registering tool"
    );

    // DTO
    let dtos_dir = layout.dtos_dir(&domain);
    session.create_dir(&dtos_dir)?;
    session.create_file_if_absent(
        &dtos_dir.join(&tool.dto.file_name),
        &render_dto(&tool.dto),
        "DTO",
    )?;

    // Service method
    let class_anchor = BlockAnchor::exported_class(&service.class_name)?;
    let has_method = rewriter.inspect(&service.path, &class_anchor, |doc| {
        doc.has_method(&tool.method_name)
    })?;
    if has_method == Some(true) {
        session.warn(format!(
            "{} already has a {} method, left unchanged",
            service.class_name, tool.method_name
        ));
    } else {
        session.ensure_import(
            &service.path,
            &dto_import_for(&service.path, &layout.domain_dir(&domain), &tool.dto),
        )?;
        session.insert_member(
            &service.path,
            &class_anchor,
            &service_method_stub(&tool.method_name, &tool.dto),
        )?;
    }

    // Registries
    let style = EntryStyle {
        trailing_comma: true,
    };
    session.insert_entry(
        &layout.env_file(),
        &BlockAnchor::exported_object(ENV_OBJECT)?,
        &env_field(&tool.env_var),
        style,
    )?;
    session.insert_entry(
        &layout.tools_metadata(),
        &metadata_anchor,
        &metadata_entry(&tool),
        style,
    )?;

    let registry = layout.tools_registry();
    let instance = instance_name_for(&service.class_name);
    session.ensure_import(
        &registry,
        &import_line(&[&instance], &layout.registry_import(&service.path)),
    )?;
    session.ensure_import(
        &registry,
        &import_line(
            &[&tool.dto.request],
            &layout.registry_import(&dtos_dir.join(&tool.dto.file_name)),
        ),
    )?;
    session.insert_entry(
        &registry,
        &registry_anchor,
        &registry_entry(&tool, &instance),
        style,
    )?;

    Ok(())
}

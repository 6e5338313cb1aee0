//! new-client: add an HTTP or DB client to an existing domain.

use tracing::{info, instrument};

use crate::{
    application::session::GeneratorSession,
    domain::{
        ArtifactKind, DomainError, EntityKind, InputRole, InputValidator, NameDeriver,
        templates::{render_api_utils, render_client, render_dto},
    },
    error::StencilResult,
};

#[instrument(skip_all)]
pub(crate) fn run(session: &mut GeneratorSession<'_>) -> StencilResult<()> {
    let layout = session.layout();

    let domains = session.discovery().list_domains()?;
    let selection = session.select(EntityKind::Domain, &domains, &layout.domains_dir())?;
    let domain = selection.entity().dir_name.clone();

    let kind = session.ask(InputRole::ClientType, "Client type (1 = HTTP, 2 = DB)")?;
    let kind = InputValidator::client_kind(&kind)?;

    let name = session
        .ask_with_default(InputRole::ClientName, "Client name", &domain)?
        .or_default(&domain);
    let method = session.ask_with_default(
        InputRole::ClientMethodName,
        "Client method name",
        kind.default_method(),
    )?;

    // Validate
    let names = NameDeriver::new().derive(&domain, kind, &name, method.as_str());
    let client_path = layout.clients_dir(&domain).join(&names.file_name);
    if session.fs().exists(&client_path) {
        return Err(DomainError::AlreadyExists {
            what: format!("{kind} {}", names.class_name),
            path: layout.relative(&client_path),
        }
        .into());
    }

    info!(
        domain = %domain,
        class = %names.class_name,
        method = %names.method_name,
        "creating client"
    );

    // Structural changes
    session.create_dir(&layout.clients_dir(&domain))?;
    session.create_dir(&layout.dtos_dir(&domain))?;

    // Content changes
    session.create_file(&client_path, &render_client(&names))?;
    session.create_file_if_absent(
        &layout.dtos_dir(&domain).join(&names.dto.file_name),
        &render_dto(&names.dto),
        "DTO",
    )?;

    if kind == ArtifactKind::HttpClient {
        let api_utils = layout.api_utils(&domain);
        if !session.fs().exists(&api_utils) {
            session.create_dir(&layout.utils_dir(&domain))?;
            session.create_file(&api_utils, &render_api_utils())?;
        }
    }

    Ok(())
}

//! new-domain: a fresh `src/domain/<name>` with a service and optional clients.

use tracing::{info, instrument};

use crate::{
    application::session::GeneratorSession,
    domain::{
        ArtifactKind, ClientRef, DomainError, InputRole, InputValidator, NameDeriver,
        ServiceWiring,
        templates::{render_api_utils, render_client, render_dto, render_service},
    },
    error::StencilResult,
};

#[instrument(skip_all)]
pub(crate) fn run(session: &mut GeneratorSession<'_>) -> StencilResult<()> {
    let domain = session.ask(InputRole::DomainName, "Domain name")?;
    let method = session.ask_with_default(
        InputRole::ServiceMethodName,
        "Service method name",
        ArtifactKind::Service.default_method(),
    )?;
    let want_http = session.ask(InputRole::YesNo, "Create an HTTP client? [y/N]")?;
    let want_db = session.ask(InputRole::YesNo, "Create a DB client? [y/N]")?;

    // Validate
    let domain = domain.require()?;
    let want_http = InputValidator::yes_no(&want_http)?;
    let want_db = InputValidator::yes_no(&want_db)?;

    let deriver = NameDeriver::new();
    let service = deriver.derive(domain, ArtifactKind::Service, "", method.as_str());
    let layout = session.layout();

    let domain_dir = layout.domain_dir(&service.domain_dir);
    if session.fs().exists(&domain_dir) {
        return Err(DomainError::DuplicateDomain {
            name: service.domain_dir.clone(),
        }
        .into());
    }

    // Clients share the service's method so the service can delegate.
    let http = want_http.then(|| {
        deriver.derive(domain, ArtifactKind::HttpClient, "", &service.method_name)
    });
    let db = want_db
        .then(|| deriver.derive(domain, ArtifactKind::DbClient, "", &service.method_name));

    info!(
        domain = %service.domain_dir,
        http = want_http,
        db = want_db,
        "creating domain"
    );

    // Structural changes
    let dir = &service.domain_dir;
    for sub in [
        layout.services_dir(dir),
        layout.clients_dir(dir),
        layout.dtos_dir(dir),
        layout.utils_dir(dir),
    ] {
        session.create_dir(&sub)?;
    }

    // Content changes
    let wiring = ServiceWiring {
        http: http.as_ref().map(ClientRef::from_names),
        db: db.as_ref().map(ClientRef::from_names),
    };
    session.create_file(
        &layout.services_dir(dir).join(&service.file_name),
        &render_service(&service, &wiring),
    )?;
    session.create_file(
        &layout.dtos_dir(dir).join(&service.dto.file_name),
        &render_dto(&service.dto),
    )?;

    for client in http.iter().chain(db.iter()) {
        session.create_file(
            &layout.clients_dir(dir).join(&client.file_name),
            &render_client(client),
        )?;
    }

    if http.is_some() {
        let api_utils = layout.api_utils(dir);
        if !session.fs().exists(&api_utils) {
            session.create_file(&api_utils, &render_api_utils())?;
        }
    }

    Ok(())
}

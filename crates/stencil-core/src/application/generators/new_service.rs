//! new-service: add a service to an existing domain, optionally wired to
//! clients already in it.

use tracing::{debug, info, instrument};

use crate::{
    application::{generators::dto_import_for, session::GeneratorSession},
    domain::{
        ArtifactKind, BlockAnchor, ClientRef, DerivedNameSet, DiscoveredEntity, DomainError,
        EntityKind, InputRole, NameDeriver, ServiceWiring, Selection,
        templates::{client_method_stub, render_dto, render_service},
    },
    error::StencilResult,
};

#[instrument(skip_all)]
pub(crate) fn run(session: &mut GeneratorSession<'_>) -> StencilResult<()> {
    let layout = session.layout();
    let discovery = session.discovery();

    let domains = discovery.list_domains()?;
    let domain = session
        .select(EntityKind::Domain, &domains, &layout.domains_dir())?
        .into_entity()
        .dir_name;

    let service = session.ask(InputRole::ServiceName, "Service name")?;
    let service = service.require()?.to_string();
    let method = session.ask_with_default(
        InputRole::ServiceMethodName,
        "Service method name",
        ArtifactKind::Service.default_method(),
    )?;

    let names = NameDeriver::new().derive(&domain, ArtifactKind::Service, &service, method.as_str());
    let service_path = layout.services_dir(&domain).join(&names.file_name);
    if session.fs().exists(&service_path) {
        return Err(DomainError::AlreadyExists {
            what: format!("Service {}", names.class_name),
            path: layout.relative(&service_path),
        }
        .into());
    }

    let http_clients = discovery.list_clients(&domain, ArtifactKind::HttpClient)?;
    let http = session
        .select_optional(EntityKind::HttpClient, &http_clients)?
        .map(Selection::into_entity);
    let db_clients = discovery.list_clients(&domain, ArtifactKind::DbClient)?;
    let db = session
        .select_optional(EntityKind::DbClient, &db_clients)?
        .map(Selection::into_entity);

    info!(
        domain = %domain,
        class = %names.class_name,
        http = http.is_some(),
        db = db.is_some(),
        "creating service"
    );

    // Structural changes
    session.create_dir(&layout.services_dir(&domain))?;
    session.create_dir(&layout.dtos_dir(&domain))?;

    // Content changes
    let wiring = ServiceWiring {
        http: http.as_ref().map(client_ref),
        db: db.as_ref().map(client_ref),
    };
    session.create_file(&service_path, &render_service(&names, &wiring))?;
    session.create_file_if_absent(
        &layout.dtos_dir(&domain).join(&names.dto.file_name),
        &render_dto(&names.dto),
        "DTO",
    )?;

    for client in http.iter().chain(db.iter()) {
        extend_client(session, client, &names)?;
    }

    Ok(())
}

fn client_ref(entity: &DiscoveredEntity) -> ClientRef {
    ClientRef::new(&entity.class_name, entity.module())
}

/// Give `client` the service's method unless it already has one.
fn extend_client(
    session: &mut GeneratorSession<'_>,
    client: &DiscoveredEntity,
    names: &DerivedNameSet,
) -> StencilResult<()> {
    let anchor = BlockAnchor::exported_class(&client.class_name)?;
    let has_method = session
        .rewriter()
        .inspect(&client.path, &anchor, |doc| doc.has_method(&names.method_name))?;

    match has_method {
        Some(true) => {
            debug!(client = %client.class_name, "client already has the method");
            return Ok(());
        }
        Some(false) => {}
        None => {
            let rel = session.layout().relative(&client.path);
            session.warn(format!(
                "`{}` not found in {rel}, client not extended",
                anchor.label()
            ));
            return Ok(());
        }
    }

    let kind = match client.kind {
        EntityKind::DbClient => ArtifactKind::DbClient,
        _ => ArtifactKind::HttpClient,
    };
    let domain_dir = session.layout().domain_dir(&client.dir_name);

    session.ensure_import(
        &client.path,
        &dto_import_for(&client.path, &domain_dir, &names.dto),
    )?;
    session.insert_member(
        &client.path,
        &anchor,
        &client_method_stub(kind, &client.class_name, &names.method_name, &names.dto),
    )?;
    Ok(())
}

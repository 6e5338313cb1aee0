//! init-project: turn the pristine template into a named project.
//!
//! The template ships with a placeholder domain. This generator renames it
//! and everything derived from it, stamps the manifest, then removes itself
//! from the project. The self-destruct step runs strictly last so a failed
//! run can simply be retried.

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, session::GeneratorSession},
    domain::{
        ArtifactKind, DerivedNameSet, DomainError, InputRole, NameDeriver, PackageManifest,
        RenamePlan, RewriteSpec, naming::DEFAULT_PROJECT_NAME, to_kebab_case, to_upper_snake_case,
    },
    error::StencilResult,
};

/// Domain directory of the pristine template.
pub const PLACEHOLDER_DOMAIN: &str = "domain-name";

/// Service method of the pristine template.
pub const PLACEHOLDER_METHOD: &str = "getData";

struct InitAnswers {
    project_name: String,
    description: String,
    domain: String,
    method: String,
}

#[instrument(skip_all)]
pub(crate) fn run(session: &mut GeneratorSession<'_>) -> StencilResult<()> {
    let answers = gather(session)?;
    let layout = session.layout();
    let fs = session.fs();

    // Validate
    let manifest_path = layout.manifest();
    if !fs.exists(&manifest_path) {
        return Err(ApplicationError::RequiredFileMissing {
            path: manifest_path,
        }
        .into());
    }
    let mut manifest = PackageManifest::parse(&fs.read_to_string(&manifest_path)?)?;

    let deriver = NameDeriver::new();
    let old = deriver.derive(
        PLACEHOLDER_DOMAIN,
        ArtifactKind::Service,
        "",
        PLACEHOLDER_METHOD,
    );
    let new = deriver.derive(&answers.domain, ArtifactKind::Service, "", &answers.method);

    let old_dir = layout.domain_dir(&old.domain_dir);
    if !fs.is_dir(&old_dir) {
        return Err(ApplicationError::TemplateProjectState {
            reason: format!("{} not found", layout.relative(&old_dir)),
        }
        .into());
    }
    if new.domain_dir != old.domain_dir && fs.exists(&layout.domain_dir(&new.domain_dir)) {
        return Err(DomainError::DuplicateDomain {
            name: new.domain_dir.clone(),
        }
        .into());
    }

    info!(
        project = %answers.project_name,
        previous = manifest.name().unwrap_or_default(),
        domain = %new.domain_dir,
        method = %new.method_name,
        "initialising project"
    );

    // Structural changes
    let old_service = layout.services_dir(&old.domain_dir).join(&old.file_name);
    let old_dto = layout.dtos_dir(&old.domain_dir).join(&old.dto.file_name);
    let plan = RenamePlan::new()
        .rename_dir(&old_dir, layout.domain_dir(&new.domain_dir))
        .rename_file(
            &old_service,
            layout.services_dir(&old.domain_dir).join(&new.file_name),
        )
        .rename_file(
            &old_dto,
            layout.dtos_dir(&old.domain_dir).join(&new.dto.file_name),
        );

    for step in plan.steps() {
        if fs.exists(&step.from) {
            session.rename(&step)?;
        } else {
            session.warn(format!(
                "{} not found, rename skipped",
                layout.relative(&step.from)
            ));
        }
    }

    // Content changes, addressed at post-rename paths
    let spec = rewrite_spec(&old, &new)?;
    for path in [
        plan.resolve(&old_service),
        plan.resolve(&old_dto),
        layout.tools_registry(),
        layout.tools_metadata(),
        layout.env_file(),
    ] {
        session.rewrite(&path, &spec)?;
    }

    manifest.set_name(&answers.project_name);
    manifest.set_description(&answers.description);
    session.overwrite(&manifest_path, &manifest.to_pretty_string()?)?;

    // Self-destruct
    let key = layout.init_script_key();
    if manifest.remove_script(key) {
        session.overwrite(&manifest_path, &manifest.to_pretty_string()?)?;
    } else {
        session.warn(format!("scripts.{key} not found in the manifest"));
    }

    let script = layout.init_script();
    if fs.exists(&script) {
        session.remove_file(&script)?;
    } else {
        session.warn(format!("{} not found, nothing to delete", layout.relative(&script)));
    }

    Ok(())
}

fn gather(session: &mut GeneratorSession<'_>) -> StencilResult<InitAnswers> {
    let project = session.ask_with_default(InputRole::ProjectName, "Project name", DEFAULT_PROJECT_NAME)?;
    let mut project_name = to_kebab_case(project.as_str());
    if project_name.is_empty() {
        project_name = DEFAULT_PROJECT_NAME.to_string();
    }

    let default_description = format!("{project_name} MCP server");
    let description = session
        .ask_with_default(
            InputRole::ProjectDescription,
            "Project description",
            &default_description,
        )?
        .or_default(&default_description);

    let domain = session.ask(InputRole::DomainName, "Domain name (e.g. order-system)")?;
    let method = session.ask_with_default(
        InputRole::ServiceMethodName,
        "Service method name",
        ArtifactKind::Service.default_method(),
    )?;

    Ok(InitAnswers {
        project_name,
        description,
        domain: domain.require()?.to_string(),
        method: method.as_str().to_string(),
    })
}

/// Ordered rules renaming every placeholder identifier. Narrow, longer
/// identifiers run before the bare method and domain path they contain.
fn rewrite_spec(old: &DerivedNameSet, new: &DerivedNameSet) -> StencilResult<RewriteSpec> {
    let old_tool = to_kebab_case(&old.method_name);
    let new_tool = to_kebab_case(&new.method_name);
    let old_toggle = format!("{}_ENABLED", to_upper_snake_case(&old.method_name));
    let new_toggle = format!("{}_ENABLED", to_upper_snake_case(&new.method_name));

    Ok(RewriteSpec::new()
        .literal(&old.class_name, &new.class_name)
        .literal(&old.instance_name, &new.instance_name)
        .literal(&old.dto.request, &new.dto.request)
        .literal(&old.dto.response, &new.dto.response)
        .literal(old.dto.module(), new.dto.module())
        .word(&old.method_name, &new.method_name)
        .literal(format!("\"{old_tool}\""), format!("\"{new_tool}\""))
        .literal(format!("'{old_tool}'"), format!("'{new_tool}'"))
        .word(&old_toggle, &new_toggle)
        .pattern(
            &format!(r"\b{}\b", regex::escape(&old.domain_dir)),
            new.domain_dir.replace('$', "$$"),
        )?)
}

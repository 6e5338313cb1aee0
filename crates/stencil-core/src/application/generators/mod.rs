//! The five generators.
//!
//! Each one follows the same fixed sequence: gather answers, validate,
//! derive names, make structural changes, then content changes. Nothing is
//! written before validation has passed.

pub mod init_project;
pub mod new_client;
pub mod new_domain;
pub mod new_service;
pub mod new_tool;

use std::path::Path;

use crate::domain::{DtoNames, templates::import_line};

/// DTO import line for a file living at `file`, where `domain_dir` is the
/// domain root. Files directly in the domain root (legacy services) use
/// `./dtos`, files one level down use `../dtos`.
pub(crate) fn dto_import_for(file: &Path, domain_dir: &Path, dto: &DtoNames) -> String {
    let prefix = if file.parent() == Some(domain_dir) {
        "./dtos"
    } else {
        "../dtos"
    };
    import_line(
        &[&dto.request, &dto.response],
        &format!("{prefix}/{}", dto.module()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_import_depends_on_depth() {
        let dto = DtoNames::for_method("getForecast");
        let domain = Path::new("/p/src/domain/weather");

        assert_eq!(
            dto_import_for(&domain.join("services/weather.service.ts"), domain, &dto),
            "import { GetForecastRequestDto, GetForecastResponseDto } from \"../dtos/getForecast.dto\";"
        );
        assert_eq!(
            dto_import_for(&domain.join("service.ts"), domain, &dto),
            "import { GetForecastRequestDto, GetForecastResponseDto } from \"./dtos/getForecast.dto\";"
        );
    }
}

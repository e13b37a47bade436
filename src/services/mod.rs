//! Business logic services

pub mod authors;
pub mod catalog;
pub mod clients;
pub mod validation;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services, wired at the composition root
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub catalog: catalog::CatalogService,
    pub clients: clients::ClientsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            clients: clients::ClientsService::new(repository, auth_config),
        }
    }
}

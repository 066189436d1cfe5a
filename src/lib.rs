pub mod audit;
pub mod billing;
pub mod config;
pub mod error;
pub mod models;
pub mod rbac;
pub mod response;
pub mod routes;
pub mod scheduling;
pub mod state;
pub mod store;

pub mod dto {
    pub mod agenda;
    pub mod customers;
    pub mod permissions;
    pub mod reports;
    pub mod settings;
}

pub mod services {
    pub mod agenda_service;
    pub mod catalog_service;
    pub mod customer_service;
    pub mod permission_service;
    pub mod report_service;
}

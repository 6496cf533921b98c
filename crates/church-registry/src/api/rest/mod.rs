pub mod church_pastors;
pub mod church_roles;
pub mod churches;
pub mod districts;
pub mod error;
pub mod pastors;
pub mod routes;
pub mod sections;

//! Web API method wrappers, one module per API area
//!
//! Each module adds methods to [`ZendClient`](crate::ZendClient) and defines
//! the typed `responseData` it decodes.

mod application;
mod cluster;
mod configuration;
mod jobqueue;
mod library;
mod server;
mod vhost;

pub use application::{
    APPLICATION_PACKAGE_MIME, ApplicationDetails, ApplicationInfo, ApplicationPackage,
    ApplicationServer, ApplicationServers, DeployRequest, UserParam, UserParams,
};
pub use cluster::{ApiKey, Bootstrap, BootstrapRequest, ClusterJoinRequest, ServerInfo};
pub use configuration::{Directive, Extension};
pub use jobqueue::Queue;
pub use library::{LIBRARY_PACKAGE_MIME, LibraryInfo, LibraryVersion, LibraryVersions, SortDirection};
pub use server::{Daemon, SystemInfo};
pub use vhost::{VhostDetails, VhostExtended, VhostInfo, VhostServer, VhostServers};

//! Admin account command and query handlers.

mod admin_avatar;
mod admin_queries;
mod delete_admin;
mod register_admin;
mod update_admin;

pub use admin_avatar::{
    DeleteAdminAvatarCommand, DeleteAdminAvatarHandler, UpdateAdminAvatarCommand,
    UpdateAdminAvatarHandler,
};
pub use admin_queries::{GetAdminHandler, GetAdminProfileHandler, GetAdminQuery, ListAdminsHandler};
pub use delete_admin::{DeleteAdminCommand, DeleteAdminHandler};
pub use register_admin::{
    AuthenticatedAdmin, LoginAdminCommand, LoginAdminHandler, RegisterAdminCommand,
    RegisterAdminHandler,
};
pub use update_admin::{
    ResetAdminPasswordCommand, ResetAdminPasswordHandler, UpdateAdminCommand, UpdateAdminHandler,
};

//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter (dto, handlers, routes);
//! `router` assembles them under the configured API prefix.
//!
//! | prefix        | module     |
//! |---------------|------------|
//! | `/admins`     | `account`  |
//! | `/customers`  | `account`  |
//! | `/products`   | `product`  |
//! | `/employees`  | `employee` |
//! | `/attendance` | `employee` |
//! | `/sales`      | `sale`     |

pub mod account;
pub mod employee;
pub mod error;
pub mod middleware;
pub mod product;
pub mod router;
pub mod sale;
pub mod state;
pub mod upload;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_routes, create_router};
pub use state::{AppState, SessionCookie};

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod error;
pub mod ids;
pub mod ledger;
pub mod model;
pub mod scrollspy;
pub mod session;
pub mod state;
pub mod viewport;

pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use model::*;
pub use scrollspy::*;
pub use session::*;
pub use state::*;
pub use viewport::*;

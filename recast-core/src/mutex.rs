// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Locking primitive used for shared state across the workspace.

pub use parking_lot::{Mutex, MutexGuard};

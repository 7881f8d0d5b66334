// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerMode {
    Hidden,
    Collapsed,
    Expanded,
}

impl ViewerMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
        }
    }
}

pub const fn viewer_mode(manual_visible: bool, editing: bool) -> ViewerMode {
    match (manual_visible, editing) {
        (false, _) => ViewerMode::Hidden,
        (true, false) => ViewerMode::Expanded,
        (true, true) => ViewerMode::Collapsed,
    }
}

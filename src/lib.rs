// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pythia — terminal client for a remote lexical-ambiguity analysis service.
//!
//! The interesting parts are `align` (token/annotation alignment), `render`
//! (highlight segments and wrapped layout), and `session` (the hover,
//! history, and analyze state machines). `client` is the service boundary
//! and `tui` composes everything into the interactive shell.

pub mod align;
pub mod client;
pub mod model;
pub mod render;
pub mod session;
pub mod tui;

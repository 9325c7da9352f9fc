// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod audio;
pub mod calls;
pub mod routing;
pub mod settings;
pub mod users;

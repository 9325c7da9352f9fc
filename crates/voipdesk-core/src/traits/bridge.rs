// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The presentation side's only way to reach the gateway.

use async_trait::async_trait;

use crate::catalog::BridgeCall;
use crate::envelope::ResultEnvelope;

/// Invokes one catalog operation on the host.
///
/// Implementations resolve exactly once per call and never return a native
/// error: every failure arrives as a `success: false` envelope.
#[async_trait]
pub trait Bridge: Send + Sync {
    async fn invoke(&self, call: BridgeCall) -> ResultEnvelope;
}

//! Simulated responder: answers locally with a canned procedure after a delay.

use super::config::EchoConfig;
use super::types::Reply;
use crate::message::Source;

pub struct EchoResponder {
    config: EchoConfig,
}

impl EchoResponder {
    #[must_use]
    pub fn new(config: EchoConfig) -> Self {
        Self { config }
    }

    pub async fn send(&self, text: &str) -> Reply {
        tokio::time::sleep(self.config.delay).await;
        let sources = if self.config.with_sources { canned_sources() } else { Vec::new() };
        Reply { content: canned_reply(text), sources }
    }
}

/// Fixed procedure text that quotes the user's query verbatim.
#[must_use]
pub fn canned_reply(text: &str) -> String {
    format!(
        "Based on your query about \"{text}\", here's the relevant procedure:\n\n\
## **Step-by-Step Process**\n\n\
1. **Initial Verification**\n   \
- Check system status in the monitoring dashboard\n   \
- Verify user permissions and access levels\n   \
- `Log into admin panel > User Management`\n\n\
2. **Diagnostic Steps**\n   \
- Run the standard diagnostic script: `./scripts/diagnose.sh`\n   \
- Review error logs in `/var/log/application/`\n   \
- Document findings in the ticket system\n\n\
3. **Resolution Protocol**\n   \
- Apply the appropriate fix based on error type\n   \
- Test the solution in staging environment\n   \
- Update documentation if new steps were required\n\n\
**⚠️ Important:** Always follow the escalation matrix if the issue persists after initial troubleshooting."
    )
}

#[must_use]
pub fn canned_sources() -> Vec<Source> {
    vec![
        Source::new(
            "Level 1 Support Troubleshooting Guide",
            "/docs/support/level1-troubleshooting.md",
            "Initial verification steps for user access issues and system diagnostics...",
        ),
        Source::new(
            "Escalation Procedures Manual",
            "/docs/processes/escalation-matrix.md",
            "When to escalate tickets and how to properly document findings...",
        ),
    ]
}

#[cfg(test)]
#[path = "echo_test.rs"]
mod tests;

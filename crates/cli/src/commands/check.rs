// SPDX-License-Identifier: MIT

//! `upkeep check` - validate the mail settings without touching the host.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use upkeep_adapters::{NotifyAdapter, SmtpNotifyAdapter};
use upkeep_core::{MailSettings, NotificationPayload};

use crate::exit_error::ExitError;

#[derive(Args)]
pub struct CheckArgs {
    /// Send a test notification after validating
    #[arg(long)]
    pub send_test: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: CheckArgs, env_file: &Path) -> Result<()> {
    let settings = MailSettings::load(env_file).map_err(ExitError::config)?;

    let mut test_delivered = None;
    if args.send_test {
        let payload = NotificationPayload::new(
            "Upkeep Test Notification",
            "The upkeep mail settings on this host are working.",
        );
        let delivered = match SmtpNotifyAdapter::new(settings.clone()).notify(&payload).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(error = %error, "test notification failed");
                false
            }
        };
        test_delivered = Some(delivered);
    }

    if args.json {
        let obj = serde_json::json!({
            "settings_file": env_file.to_string_lossy(),
            "valid": true,
            "sender": settings.sender,
            "recipient": settings.recipient,
            "relay_host": settings.relay_host,
            "test_delivered": test_delivered,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        println!("Settings file {} is valid.", env_file.display());
        println!("  sender:    {}", settings.sender);
        println!("  recipient: {}", settings.recipient);
        println!("  relay:     {}", settings.relay_host);
        if let Some(delivered) = test_delivered {
            println!("  test mail: {}", if delivered { "delivered" } else { "failed" });
        }
    }
    Ok(())
}

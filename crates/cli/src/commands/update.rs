// SPDX-License-Identifier: MIT

//! `upkeep update` - run the maintenance plan and email the outcome.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use upkeep_adapters::{HostProcessAdapter, HostRebootMarker, NotifyAdapter, SmtpNotifyAdapter};
use upkeep_core::{fatal_payload, maintenance_plan, CommandSpec, ConfigError, MailSettings};
use upkeep_engine::{RebootGate, RunReport, UpdateWorkflow, DEFAULT_GRACE};

use crate::exit_error::ExitError;

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;

#[derive(Args)]
pub struct UpdateArgs {
    /// Print the plan without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Seconds to wait between the notification attempt and a reboot
    #[arg(long, default_value_t = DEFAULT_GRACE.as_secs())]
    pub grace_secs: u64,

    /// Reboot only when the notification was actually delivered
    #[arg(long)]
    pub confirm_delivery: bool,
}

pub async fn run(args: UpdateArgs, env_file: &Path) -> Result<()> {
    let settings = match MailSettings::load(env_file) {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!(error = %error, "configuration error, nothing was run");
            report_config_failure(env_file, &error).await;
            return Err(ExitError::config(error).into());
        }
    };

    let plan = maintenance_plan();
    let gate = gate_for(&args);

    if args.dry_run {
        print!("{}", render_plan(&plan, gate, args.grace_secs));
        return Ok(());
    }

    let notifier = SmtpNotifyAdapter::new(settings);
    let workflow =
        UpdateWorkflow::new(HostProcessAdapter::new(), HostRebootMarker::new(), notifier.clone())
            .gate(gate)
            .grace(Duration::from_secs(args.grace_secs));

    let report = workflow.run(&plan).await;

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(error) => {
                let description = format!("could not render the run report: {error}");
                notify_fatal(&notifier, &description).await;
                return Err(ExitError::new(1, description).into());
            }
        }
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn gate_for(args: &UpdateArgs) -> RebootGate {
    if args.confirm_delivery {
        RebootGate::AfterDelivery
    } else {
        RebootGate::AfterAttempt
    }
}

fn render_plan(specs: &[CommandSpec], gate: RebootGate, grace_secs: u64) -> String {
    let mut out = format!("Would run {} commands:\n", specs.len());
    for spec in specs {
        out.push_str("  ");
        out.push_str(&spec.command_line());
        out.push('\n');
    }
    out.push_str(&format!("Reboot policy: {gate}, {grace_secs}s grace\n"));
    out
}

fn render_report(report: &RunReport) -> String {
    let mut out = format!("{}\n\n{}\n\n", report.payload.subject, report.payload.body);
    out.push_str(&format!(
        "Notification: {}\n",
        if report.delivered { "delivered" } else { "failed" }
    ));
    if report.reboot_issued {
        out.push_str("Reboot: issued\n");
    }
    out
}

/// Best-effort notice for a configuration error.
///
/// The settings that just failed to load are the same settings the notice
/// needs, so this re-reads the file and sends only if a usable transport
/// came back (a transient read failure can clear). Secondary failures are
/// logged, never raised.
async fn report_config_failure(env_file: &Path, error: &ConfigError) {
    match MailSettings::load(env_file) {
        Ok(settings) => {
            notify_fatal(&SmtpNotifyAdapter::new(settings), &error.to_string()).await;
        }
        Err(reload_error) => {
            tracing::error!(error = %reload_error, "no usable mail settings, failure notice skipped");
        }
    }
}

/// Best-effort failure notice. A secondary failure here is logged, never raised.
async fn notify_fatal<N: NotifyAdapter>(notifier: &N, description: &str) {
    let payload = fatal_payload(description);
    if let Err(notify_error) = notifier.notify(&payload).await {
        tracing::error!(error = %notify_error, "could not deliver the failure notice");
    }
}

// SPDX-License-Identifier: MIT

use proptest::prelude::*;

use super::*;
use crate::command::CommandSpec;
use crate::outcome::{CommandError, CommandOutcome, RebootPending};

fn outcome_strategy() -> impl Strategy<Value = CommandOutcome> {
    ("[a-z][a-z0-9-]{0,12}", any::<bool>(), 1..=255i32).prop_map(|(name, succeeded, code)| {
        let spec = CommandSpec::new([name.as_str(), "-y"]);
        if succeeded {
            CommandOutcome::success(spec, "done")
        } else {
            CommandOutcome::failure(
                spec,
                CommandError::ExitNonZero {
                    code,
                    stderr: "err".to_string(),
                },
            )
        }
    })
}

proptest! {
    #[test]
    fn subject_always_matches_the_outcome_mix(
        outcomes in proptest::collection::vec(outcome_strategy(), 0..8),
        required in any::<bool>(),
        packages in proptest::collection::vec("[a-z]{3,8}", 0..3),
    ) {
        let reboot = if required {
            RebootPending::required_by(packages)
        } else {
            RebootPending::none()
        };
        let run = UpdateRun::new(outcomes, reboot);
        let payload = classify(&run);

        let expected = match (run.any_succeeded(), run.any_failed()) {
            (true, false) => "Update Completed Successfully",
            (true, true) => "Update Completed with Errors",
            (false, true) => "Update Failed",
            (false, false) => "Update — No Changes",
        };
        prop_assert_eq!(&payload.subject, expected);
        if run.any_failed() {
            prop_assert_ne!(&payload.subject, "Update Completed Successfully");
        }

        for line in run.failure_lines() {
            prop_assert!(payload.body.contains(&line));
        }
        prop_assert_eq!(required, payload.body.contains("A reboot is required"));
        prop_assert_eq!(classify(&run), payload);
    }
}

use crate::cli::Cli;
use crate::error::{PipReviewError, Result};
use crate::forward::{INSTALL_ONLY, LIST_ONLY, filter_forwards};
use crate::interact::{Answer, AskerState, ask};
use crate::packages::{PackageRecord, apply_name_filter};
use crate::pip::{ListInvocation, PipExecutionAgent, parse_outdated};
use crate::upgrade::{FREEZE_FILE, UpgradeOptions, update_packages};
use colored::Colorize;
use indicatif::ProgressBar;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

/// Top-level result of a review run, mapped to an exit status in `main`.
pub enum Outcome {
    Success,
    /// The user interrupted the run; exits cleanly with status 0.
    Aborted,
}

/// Execute the review pipeline: split the forwarded arguments, list the
/// outdated packages, filter them, optionally ask per package, upgrade.
pub fn execute_review(cli: &Cli) -> Result<Outcome> {
    let list_args = filter_forwards(&cli.forwarded, INSTALL_ONLY);
    let install_args = filter_forwards(&cli.forwarded, LIST_ONLY);

    let agent = PipExecutionAgent::new();
    let invocation = {
        let (major, minor, patch) = agent.pip_version()?;
        ListInvocation::for_pip_version(major, minor, patch)
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Querying pip for outdated packages...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let listing = agent.list_outdated(&list_args, invocation);
    spinner.finish_and_clear();

    let outdated = parse_outdated(&listing?, invocation.format)?;
    let outdated = apply_name_filter(outdated, &cli.whitelist, true)?;
    let outdated = apply_name_filter(outdated, &cli.blacklist, false)?;

    let options = UpgradeOptions {
        continue_on_fail: cli.continue_on_fail,
        freeze: cli.freeze_outdated_packages,
    };

    if outdated.is_empty() && !cli.raw {
        println!("{}", "Everything up-to-date".green());
        return Ok(Outcome::Success);
    }

    if cli.auto {
        update_packages(
            &agent,
            &outdated,
            &install_args,
            options,
            Path::new(FREEZE_FILE),
        )?;
        return Ok(Outcome::Success);
    }

    if cli.raw {
        for pkg in &outdated {
            println!("{}=={}", pkg.name, pkg.latest_version);
        }
        return Ok(Outcome::Success);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let selected = match select_packages(&outdated, cli.interactive, &mut input, &mut output) {
        Ok(selected) => selected,
        Err(PipReviewError::Interrupted) => return Ok(Outcome::Aborted),
        Err(e) => return Err(e),
    };

    if !selected.is_empty() {
        update_packages(
            &agent,
            &selected,
            &install_args,
            options,
            Path::new(FREEZE_FILE),
        )?;
    }

    Ok(Outcome::Success)
}

/// Announce each outdated package and, in interactive mode, collect the
/// subset the user approved. `All` approves the rest without asking again;
/// `Quit` declines the rest the same way.
fn select_packages(
    outdated: &[PackageRecord],
    interactive: bool,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Vec<PackageRecord>> {
    let mut selected = Vec::new();
    let mut state = AskerState::default();

    for pkg in outdated {
        writeln!(
            output,
            "{} is available (you have {})",
            format!("{}=={}", pkg.name, pkg.latest_version).green().bold(),
            pkg.version.red()
        )?;
        if interactive {
            match ask(&mut state, "Upgrade now?", input, output)? {
                Answer::Yes | Answer::All => selected.push(pkg.clone()),
                Answer::No | Answer::Quit => {}
            }
        }
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Vec<PackageRecord> {
        vec![
            PackageRecord::new("foo", "1.0", "2.0"),
            PackageRecord::new("bar", "0.1", "0.2"),
            PackageRecord::new("baz", "3.0", "3.1"),
        ]
    }

    fn select(answers: &str, interactive: bool) -> Vec<PackageRecord> {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        select_packages(&sample(), interactive, &mut input, &mut output).unwrap()
    }

    #[test]
    fn non_interactive_selects_nothing() {
        assert!(select("", false).is_empty());
    }

    #[test]
    fn yes_and_no_pick_individual_packages() {
        let selected = select("y\nn\ny\n", true);
        assert_eq!(
            selected,
            vec![
                PackageRecord::new("foo", "1.0", "2.0"),
                PackageRecord::new("baz", "3.0", "3.1"),
            ]
        );
    }

    #[test]
    fn all_approves_the_rest_without_further_input() {
        let selected = select("n\na\n", true);
        assert_eq!(
            selected,
            vec![
                PackageRecord::new("bar", "0.1", "0.2"),
                PackageRecord::new("baz", "3.0", "3.1"),
            ]
        );
    }

    #[test]
    fn quit_declines_the_rest_without_further_input() {
        let selected = select("y\nq\n", true);
        assert_eq!(selected, vec![PackageRecord::new("foo", "1.0", "2.0")]);
    }

    #[test]
    fn every_package_is_announced_even_after_quit() {
        let mut input = Cursor::new(b"q\n".to_vec());
        let mut output = Vec::new();
        select_packages(&sample(), true, &mut input, &mut output).unwrap();
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("foo==2.0"));
        assert!(shown.contains("bar==0.2"));
        assert!(shown.contains("baz==3.1"));
    }

    #[test]
    fn eof_during_selection_is_an_interrupt() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let err = select_packages(&sample(), true, &mut input, &mut output).unwrap_err();
        assert!(matches!(err, PipReviewError::Interrupted));
    }
}

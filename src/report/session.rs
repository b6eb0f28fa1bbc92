//! Display Session
//!
//! Human-readable reports about one question at a time. A session remembers
//! every source it has printed so dependency listings never repeat them.

use std::collections::HashSet;
use std::io::Write;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use super::summary::{AnswerOutcome, ShowReport};
use crate::bench;
use crate::catalog::{Candidate, Catalog, Specification};
use crate::config::Config;
use crate::engine::{guarded, Match, Matcher, Permutation, Trial};
use crate::fault::Fault;
use crate::introspect::{definition, extract_source, filter_new, trace_dependencies, ShownSources};
use crate::unit::{CodeUnit, UnitRef};

const ANSWER_RULE: &str = "--------------------------";
const MATCH_RULE: &str = "-------------------------";

/// Writes reports to `out` and keeps a summary of what was reported
pub struct Session<'c, W: Write> {
    catalog: &'c Catalog,
    config: Config,
    out: W,
    shown: ShownSources,
    report: ShowReport,
}

/// Distinct units in first-seen order
#[derive(Default)]
struct Dependencies {
    order: Vec<&'static CodeUnit>,
    seen: HashSet<UnitRef>,
}

impl Dependencies {
    fn extend(&mut self, units: Vec<&'static CodeUnit>) {
        for unit in units {
            if self.seen.insert(UnitRef(unit)) {
                self.order.push(unit);
            }
        }
    }
}

impl<'c, W: Write> Session<'c, W> {
    pub fn new(catalog: &'c Catalog, config: Config, out: W) -> Self {
        let report = ShowReport {
            config: Some(config.clone()),
            ..ShowReport::default()
        };
        Self {
            catalog,
            config,
            out,
            shown: ShownSources::new(),
            report,
        }
    }

    pub fn summary(&self) -> ShowReport {
        self.report.clone()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn lookup(&self, name: &str) -> Result<&'static Specification> {
        self.catalog
            .question(name)
            .ok_or_else(|| anyhow!("No question with name {} found", name))
    }

    /// Print a question, its declared answers and how they fare against it.
    ///
    /// A question nobody declared an answer for is asked instead.
    pub fn show_question(&mut self, name: &str) -> Result<()> {
        let spec = self.lookup(name)?;
        self.report.question = Some(spec.name());
        writeln!(self.out)?;
        self.show_source(spec.unit(), None)?;

        let catalog = self.catalog;
        let answers = catalog.answers_for(spec);
        if answers.is_empty() {
            writeln!(self.out, "No answers have been marked as solving this question, which is a problem.")?;
            writeln!(
                self.out,
                "The question will now be asked manually. If any solutions are found, please contribute by registering them with:"
            )?;
            writeln!(self.out)?;
            writeln!(self.out, "    catalog.add_answer(&ANSWER, &[&{}])", spec.name().to_uppercase())?;
            writeln!(self.out)?;
            return self.ask_spec(spec);
        }

        writeln!(self.out, "Answers:")?;
        writeln!(self.out)?;
        let mut dependencies = Dependencies::default();
        let mut passing = Vec::new();
        for &answer in answers {
            let trial = Trial::identity(answer);
            dependencies.extend(trace_dependencies(spec, &trial, true));
            self.show_source(answer.unit(), None)?;

            match guarded(|| spec.check(answer)) {
                Ok(()) => {
                    writeln!(self.out, "Passed tests successfully.")?;
                    writeln!(self.out, "{}", ANSWER_RULE)?;
                    writeln!(self.out)?;
                    self.report.answers.push(AnswerOutcome {
                        answer: answer.name(),
                        passed: true,
                        fault: None,
                    });
                    passing.push(trial);
                }
                Err(fault) => {
                    self.show_fault(spec, answer, &fault)?;
                    self.report.answers.push(AnswerOutcome {
                        answer: answer.name(),
                        passed: false,
                        fault: Some(fault.to_string()),
                    });
                }
            }
        }
        info!("{}: {} of {} declared answers passed", spec.name(), passing.len(), answers.len());

        self.time_trials(spec, &passing)?;
        self.show_dependencies(dependencies)
    }

    /// Search the whole catalog for answers to the named question
    pub fn ask(&mut self, name: &str) -> Result<()> {
        let spec = self.lookup(name)?;
        self.report.question = Some(spec.name());
        writeln!(self.out)?;
        self.ask_spec(spec)
    }

    fn ask_spec(&mut self, spec: &'static Specification) -> Result<()> {
        let matches = match Matcher::new(self.catalog).find(spec) {
            Ok(matches) => matches,
            Err(abort) => {
                writeln!(self.out, "{}", abort)?;
                self.report.aborted = Some(abort.to_string());
                return Ok(());
            }
        };

        let mut dependencies = Dependencies::default();
        for found in &matches {
            self.show_match(found)?;
            dependencies.extend(trace_dependencies(spec, &found.trial(), false));
        }
        self.report.matches.extend(matches.iter().cloned());

        if matches.is_empty() {
            writeln!(
                self.out,
                "Sorry, no correct answers found. If you find one, please consider contributing it!"
            )?;
            return Ok(());
        }

        let trials: Vec<Trial> = matches.iter().map(Match::trial).collect();
        self.time_trials(spec, &trials)?;
        self.show_dependencies(dependencies)
    }

    fn show_match(&mut self, found: &Match) -> Result<()> {
        self.show_source(found.candidate.unit(), Some(&found.permutation))?;
        let catalog = self.catalog;
        let solved = catalog.solved_by(found.candidate);
        if !solved.is_empty() {
            let names: Vec<&str> = solved.iter().map(|spec| spec.name()).collect();
            writeln!(
                self.out,
                "Solves the question{} {}",
                if solved.len() > 1 { "s" } else { "" },
                names.join(", ")
            )?;
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}", MATCH_RULE)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn show_fault(&mut self, spec: &Specification, answer: &Candidate, fault: &Fault) -> Result<()> {
        writeln!(self.out, "Failed tests with fault:")?;
        if self.config.fault_traces && !fault.is_environmental() {
            for unit in [spec.unit(), answer.unit()] {
                let line = definition(unit).map(|def| def.header_line).unwrap_or(0);
                writeln!(self.out, "  in {} at {}:{}", unit.name(), unit.source().path(), line)?;
            }
        }
        writeln!(self.out, "{}", fault)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn time_trials(&mut self, spec: &Specification, trials: &[Trial]) -> Result<()> {
        if !self.config.time_answers || trials.len() < 2 {
            return Ok(());
        }
        let config = self.config.bench();
        let timings = bench::rank(spec, trials, &config);

        writeln!(self.out, "Best times per answer:")?;
        for timing in &timings {
            writeln!(
                self.out,
                "{}: {:.3} s ({} repetitions)",
                timing.candidate,
                timing.elapsed.as_secs_f64(),
                timing.repetitions
            )?;
        }
        writeln!(self.out, "(best of {} batches each)", config.batches.max(1))?;
        writeln!(self.out)?;
        self.report.timings = timings;
        Ok(())
    }

    fn show_dependencies(&mut self, dependencies: Dependencies) -> Result<()> {
        let fresh = filter_new(&dependencies.order, &self.shown);
        if fresh.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "Dependencies:")?;
        writeln!(self.out)?;
        for (unit, source) in fresh {
            self.print_source(unit, &source)?;
            self.report.dependencies.push(unit.to_string());
        }
        Ok(())
    }

    fn show_source(&mut self, unit: &CodeUnit, permutation: Option<&Permutation>) -> Result<()> {
        let source = extract_source(unit, permutation)
            .with_context(|| format!("Failed to display {}", unit))?;
        self.print_source(unit, &source)
    }

    fn print_source(&mut self, unit: &CodeUnit, source: &str) -> Result<()> {
        let line = definition(unit)?.header_line;
        writeln!(self.out, "{}:{}", unit.source().path(), line)?;
        writeln!(self.out, "{}", source)?;
        writeln!(self.out)?;
        self.shown.insert(source);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, answers, questions};

    fn quiet() -> Config {
        Config {
            time_answers: false,
            ..Config::default()
        }
    }

    fn render(catalog: &Catalog, config: Config, run: impl FnOnce(&mut Session<'_, Vec<u8>>) -> Result<()>) -> (String, ShowReport) {
        let mut session = Session::new(catalog, config, Vec::new());
        run(&mut session).unwrap();
        let report = session.summary();
        (String::from_utf8(session.into_inner()).unwrap(), report)
    }

    #[test]
    fn test_show_question_with_dependencies() {
        let catalog = catalog::load().unwrap();
        let (out, report) = render(&catalog, quiet(), |s| s.show_question("is_even"));

        assert!(out.contains("fn is_even(func: &dyn Subject) -> Outcome {"));
        assert!(out.contains("Answers:"));
        assert!(out.contains("fn is_even(a: &Value) -> Fallible {"));
        assert!(out.contains("Passed tests successfully."));
        let deps = out.split("Dependencies:").nth(1).unwrap();
        assert!(deps.contains("fn is_divisible_by(a: &Value, b: &Value) -> Fallible {"));
        assert_eq!(report.passed().count(), 1);
        assert!(report.timings.is_empty());
    }

    #[test]
    fn test_show_question_includes_nested_questions() {
        let catalog = catalog::load().unwrap();
        let (out, _) = render(&catalog, quiet(), |s| s.show_question("flatten_2d_list_to_list"));
        let deps = out.split("Dependencies:").nth(1).unwrap();
        assert!(deps.contains("fn flatten_2d_list(func: &dyn Subject) -> Outcome {"));
        assert!(deps.contains("fn rows(table: &Value)"));
        // already shown as a declared answer
        assert!(!deps.contains("fn flatten_using_flat_map(lists: &Value)"));
    }

    #[test]
    fn test_unavailable_fault_has_no_trace() {
        let catalog = catalog::load().unwrap();
        let (out, report) = render(&catalog, quiet(), |s| s.show_question("days_between"));
        let civil = report.answers.iter().find(|a| a.answer == "days_between_with_civil_days").unwrap();
        assert!(civil.passed);
        if cfg!(not(feature = "calendar")) {
            assert!(out.contains("Failed tests with fault:\nUnavailableFacility"));
            assert!(!out.contains("  in days_between at"));
        }
    }

    #[test]
    fn test_failing_answer_shows_trace() {
        let mut catalog = Catalog::new();
        catalog.add_question(&questions::math::IS_DIVISIBLE_BY).unwrap();
        catalog.add_answer(&answers::math::GCD_EUCLID, &[&questions::math::IS_DIVISIBLE_BY]).unwrap();
        let (out, report) = render(&catalog, quiet(), |s| s.show_question("is_divisible_by"));

        assert!(out.contains("Failed tests with fault:\n  in is_divisible_by at "));
        assert!(out.contains("  in gcd_euclid at "));
        assert!(out.contains("AssertionError: 1 is not false"));
        assert!(!report.answers[0].passed);
    }

    #[test]
    fn test_ask_reports_permuted_source_and_solved_questions() {
        let catalog = catalog::load().unwrap();
        let (out, report) = render(&catalog, quiet(), |s| s.ask("contains_all"));

        assert!(out.contains("fn contains_all_using_loop(container: &Value, contained: &Value)"));
        assert!(out.contains("fn is_subset_of(container: &Value, contained: &Value) -> Fallible {"));
        assert!(out.contains("Solves the question is_subset_of"));
        let subset = report.matches.iter().find(|m| m.candidate.name() == "is_subset_of").unwrap();
        assert_eq!(subset.permutation.indices(), &[1, 0]);
    }

    #[test]
    fn test_undeclared_question_falls_back_to_ask() {
        let mut catalog = Catalog::new();
        catalog.add_question(&questions::math::IS_EVEN).unwrap();
        catalog.add_answer(&answers::math::IS_DIVISIBLE_BY, &[]).unwrap();
        catalog.add_answer(&answers::math::IS_EVEN, &[]).unwrap();
        let (out, report) = render(&catalog, quiet(), |s| s.show_question("is_even"));

        assert!(out.contains("No answers have been marked as solving this question"));
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].candidate.name(), "is_even");
        assert!(!out.contains("Solves the question"));
    }

    #[test]
    fn test_no_match_message() {
        let mut catalog = Catalog::new();
        catalog.add_question(&questions::string::FORMAT_WITHOUT_NONES).unwrap();
        catalog.add_answer(&answers::math::GCD_EUCLID, &[]).unwrap();
        let (out, report) = render(&catalog, quiet(), |s| s.ask("format_without_nones"));
        assert!(out.contains("Sorry, no correct answers found."));
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_timings_when_several_pass() {
        let catalog = catalog::load().unwrap();
        let config = Config {
            bench_target_ms: 1,
            bench_batches: 2,
            ..Config::default()
        };
        let (out, report) = render(&catalog, config, |s| s.show_question("greatest_common_divisor"));
        assert!(out.contains("Best times per answer:"));
        assert!(out.contains("(best of 2 batches each)"));
        assert_eq!(report.timings.len(), 2);
    }

    #[test]
    fn test_unknown_question() {
        let catalog = catalog::load().unwrap();
        let mut session = Session::new(&catalog, quiet(), Vec::new());
        let err = session.show_question("no_such_question").unwrap_err();
        assert_eq!(err.to_string(), "No question with name no_such_question found");
    }
}

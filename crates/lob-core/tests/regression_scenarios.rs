// crates/lob-core/tests/regression_scenarios.rs
use lob_core::{OrderBook, SequentialIdGenerator};
use lob_protocol::csv_codec::{format_response, parse_input_line};

const SCENARIOS: &str = include_str!("data/scenarios.csv");

/// One `#name:` section: the request lines and the expected output lines.
struct Scenario {
    name: String,
    inputs: Vec<String>,
    expected: Vec<String>,
}

fn load_scenarios() -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = Vec::new();

    for raw_line in SCENARIOS.lines() {
        let line = raw_line.trim();
        if let Some(name) = line.strip_prefix("#name:") {
            scenarios.push(Scenario {
                name: name.trim().to_string(),
                inputs: Vec::new(),
                expected: Vec::new(),
            });
        } else if let Some(expected) = line.strip_prefix("> ") {
            if let Some(current) = scenarios.last_mut() {
                current.expected.push(expected.to_string());
            }
        } else if !line.is_empty() && !line.starts_with('#') {
            if let Some(current) = scenarios.last_mut() {
                current.inputs.push(line.to_string());
            }
        }
    }

    scenarios
}

#[test]
fn scenarios_match_expected_output() {
    let scenarios = load_scenarios();
    assert!(!scenarios.is_empty(), "no scenarios loaded");

    for scenario in scenarios {
        let mut book = OrderBook::with_id_generator(SequentialIdGenerator::default());
        let mut actual = Vec::new();

        for line in &scenario.inputs {
            let request = parse_input_line(line)
                .unwrap_or_else(|e| panic!("[{}] bad input {line:?}: {e}", scenario.name))
                .expect("scenario lines are never blank");
            actual.extend(format_response(&book.process(request)));
        }

        assert_eq!(actual, scenario.expected, "scenario: {}", scenario.name);
        assert!(!book.is_crossed(), "scenario left a crossed book: {}", scenario.name);
    }
}

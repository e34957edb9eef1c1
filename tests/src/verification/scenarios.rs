use std::time::{Duration, Instant};

use tunnelgate_common::digest::fingerprint;
use tunnelgate_common::gate::{Gate, GateSignals};
use tunnelgate_common::probe::ProbeStage;
use tunnelgate_core::run::{RunController, RunOutcome};

use crate::utils::{OTHER_BODY, SAME_BODY, Script, ScriptedConnector, run_config};

async fn run(gate: Gate, scripts: &[(&str, Script)]) -> (RunOutcome, Vec<String>) {
    let controller = RunController::new(ScriptedConnector::new(scripts));
    let outcome = controller.execute(&run_config(gate)).await;
    let calls = controller_calls(&controller);
    (outcome, calls)
}

fn controller_calls(controller: &RunController<ScriptedConnector>) -> Vec<String> {
    controller.connector().called()
}

#[tokio::test]
async fn identical_responses_pass_and() {
    let (outcome, calls) = run(
        Gate::And,
        &[("utun0", Script::body(SAME_BODY)), ("utun1", Script::body(SAME_BODY))],
    )
    .await;

    assert!(outcome.passed);
    assert_eq!(outcome.selected_response.as_deref(), Some(SAME_BODY));
    assert_eq!(outcome.input.digest1, Some(fingerprint(SAME_BODY)));
    assert_eq!(outcome.input.digest1, outcome.input.digest2);
    assert_eq!(calls, vec!["utun0".to_string(), "utun1".to_string()]);
}

#[tokio::test]
async fn second_probe_io_failure_fails_and() {
    let (outcome, _) = run(
        Gate::And,
        &[("utun0", Script::body(SAME_BODY)), ("utun1", Script::fail(ProbeStage::Read))],
    )
    .await;

    assert!(!outcome.passed);
    assert_eq!(outcome.selected_response, None);
    assert_eq!(
        outcome.signals,
        GateSignals { a: true, b: false, matched: false }
    );
}

#[tokio::test]
async fn second_probe_io_failure_passes_or_with_first_response() {
    let (outcome, _) = run(
        Gate::Or,
        &[("utun0", Script::body(SAME_BODY)), ("utun1", Script::fail(ProbeStage::Write))],
    )
    .await;

    assert!(outcome.passed);
    assert_eq!(outcome.selected_response.as_deref(), Some(SAME_BODY));
}

#[tokio::test]
async fn not_passes_when_first_probe_fails_and_never_dials_second() {
    let (outcome, calls) = run(
        Gate::Not,
        &[
            ("utun0", Script::fail(ProbeStage::Handshake)),
            ("utun1", Script::body(SAME_BODY)),
        ],
    )
    .await;

    assert!(outcome.passed);
    assert_eq!(outcome.input.digest2, None);
    assert_eq!(outcome.selected_response, None);
    assert_eq!(calls, vec!["utun0".to_string()]);
}

#[tokio::test]
async fn not_fails_when_first_probe_answers() {
    let (outcome, _) = run(Gate::Not, &[("utun0", Script::body(SAME_BODY))]).await;
    assert!(!outcome.passed);
}

#[tokio::test]
async fn differing_responses_fail_xor_and_pass_nand() {
    let scripts = [("utun0", Script::body(SAME_BODY)), ("utun1", Script::body(OTHER_BODY))];

    let (xor, _) = run(Gate::Xor, &scripts).await;
    assert!(!xor.passed);

    let (nand, _) = run(Gate::Nand, &scripts).await;
    assert!(nand.passed);
    assert_eq!(nand.selected_response.as_deref(), Some(SAME_BODY));
}

#[tokio::test]
async fn missing_interface_counts_as_absence() {
    let (outcome, _) = run(Gate::Xor, &[("utun0", Script::body(SAME_BODY))]).await;

    assert!(outcome.passed);
    assert_eq!(
        outcome.signals,
        GateSignals { a: true, b: false, matched: false }
    );
}

#[tokio::test]
async fn both_failed_xnor_is_false_and_nor_is_true() {
    let scripts = [
        ("utun0", Script::fail(ProbeStage::Connect)),
        ("utun1", Script::fail(ProbeStage::Interface)),
    ];

    let (xnor, _) = run(Gate::Xnor, &scripts).await;
    assert!(!xnor.passed);

    let (nor, _) = run(Gate::Nor, &scripts).await;
    assert!(nor.passed);
    assert_eq!(nor.selected_response, None);
}

#[tokio::test]
async fn completion_order_does_not_change_outcome() {
    let slow = Duration::from_millis(60);

    for gate in Gate::ALL {
        let (first_slow, _) = run(
            gate,
            &[
                ("utun0", Script::body(SAME_BODY).after(slow)),
                ("utun1", Script::fail(ProbeStage::Read)),
            ],
        )
        .await;
        let (second_slow, _) = run(
            gate,
            &[
                ("utun0", Script::body(SAME_BODY)),
                ("utun1", Script::fail(ProbeStage::Read).after(slow)),
            ],
        )
        .await;

        assert_eq!(first_slow, second_slow, "{gate} depends on completion order");
    }
}

#[tokio::test]
async fn early_failure_waits_for_the_other_probe() {
    let slow = Duration::from_millis(80);
    let started = Instant::now();

    let (outcome, _) = run(
        Gate::Or,
        &[
            ("utun0", Script::fail(ProbeStage::Interface)),
            ("utun1", Script::body(OTHER_BODY).after(slow)),
        ],
    )
    .await;

    assert!(started.elapsed() >= slow);
    assert!(outcome.passed);
    assert_eq!(outcome.selected_response.as_deref(), Some(OTHER_BODY));
}

#[tokio::test]
async fn probes_run_concurrently() {
    let slow = Duration::from_millis(150);
    let started = Instant::now();

    let (outcome, _) = run(
        Gate::And,
        &[
            ("utun0", Script::body(SAME_BODY).after(slow)),
            ("utun1", Script::body(SAME_BODY).after(slow)),
        ],
    )
    .await;

    assert!(outcome.passed);
    assert!(started.elapsed() < slow * 2, "probes were run one after another");
}

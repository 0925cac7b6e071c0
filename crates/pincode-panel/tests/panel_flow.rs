//! Integration tests for the panel session task

use pincode_panel::{spawn_session, PanelConfig, PanelOutput, PanelSignal, SessionHandle};

const CONFIG: &str = r#"
    [pincode]
    password = "1234"
    backdoor_password = "1988"
    backdoor_enabled = true
    digit_limit = 4
    masking_enabled = true
"#;

fn script(lines: &[&str]) -> Vec<PanelSignal> {
    lines
        .iter()
        .filter_map(|line| PanelSignal::parse_line(line).unwrap())
        .collect()
}

async fn run_script(config: &PanelConfig, lines: &[&str]) -> Vec<PanelOutput> {
    let SessionHandle {
        signals,
        mut outputs,
        task,
    } = spawn_session(config).unwrap();

    for signal in script(lines) {
        signals.send(signal).unwrap();
    }
    drop(signals);
    task.await.unwrap();

    let mut collected = Vec::new();
    while let Some(output) = outputs.recv().await {
        collected.push(output);
    }
    collected
}

fn outcomes(outputs: &[PanelOutput]) -> Vec<bool> {
    outputs
        .iter()
        .filter_map(|output| match output {
            PanelOutput::Outcome { matched } => Some(*matched),
            PanelOutput::Display(_) => None,
        })
        .collect()
}

#[tokio::test]
async fn test_correct_code_from_script() {
    let config = PanelConfig::parse(CONFIG).unwrap();

    let outputs = run_script(&config, &["# unlock", "1", "2", "3", "4", "Misc_2"]).await;

    assert_eq!(
        outputs,
        vec![
            PanelOutput::Display(String::new()),
            PanelOutput::Display("*".into()),
            PanelOutput::Display("**".into()),
            PanelOutput::Display("***".into()),
            PanelOutput::Display("****".into()),
            PanelOutput::Display(String::new()),
            PanelOutput::Outcome { matched: true },
            PanelOutput::Display("Password Correct".into()),
        ]
    );
}

#[tokio::test]
async fn test_fifth_digit_and_backspace() {
    let config = PanelConfig::parse(CONFIG).unwrap();

    let outputs = run_script(
        &config,
        &["1", "2", "3", "4", "5", "join:200", "4", "Misc_2"],
    )
    .await;

    assert_eq!(outcomes(&outputs), vec![true]);
    assert!(outputs.contains(&PanelOutput::Display("***".into())));
    assert!(!outputs.contains(&PanelOutput::Display("*****".into())));
}

#[tokio::test]
async fn test_retry_after_incorrect() {
    let config = PanelConfig::parse(CONFIG).unwrap();

    let outputs = run_script(
        &config,
        &["0", "0", "0", "0", "Misc_2", "1", "9", "8", "8", "Misc_2"],
    )
    .await;

    assert_eq!(outcomes(&outputs), vec![false, true]);
    assert!(outputs.contains(&PanelOutput::Display("Password Incorrect".into())));
    assert_eq!(
        outputs.last(),
        Some(&PanelOutput::Display("Password Correct".into()))
    );
}

#[tokio::test]
async fn test_clear_discards_entry() {
    let config = PanelConfig::parse(CONFIG).unwrap();

    let outputs = run_script(&config, &["1", "2", "Misc_1", "3", "4", "Misc_2"]).await;

    assert_eq!(outcomes(&outputs), vec![false]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_senders_are_serialized() {
    let config = PanelConfig::parse(CONFIG).unwrap();
    let SessionHandle {
        signals,
        mut outputs,
        task,
    } = spawn_session(&config).unwrap();

    let mut senders = Vec::new();
    for digit in ["1", "2", "3", "4"] {
        let tx = signals.clone();
        senders.push(tokio::spawn(async move {
            for _ in 0..25 {
                tx.send(PanelSignal::button(digit)).unwrap();
                tokio::task::yield_now().await;
            }
        }));
    }
    for sender in senders {
        sender.await.unwrap();
    }
    signals.send(PanelSignal::button("Misc_2")).unwrap();
    drop(signals);
    task.await.unwrap();

    let mut collected = Vec::new();
    while let Some(output) = outputs.recv().await {
        collected.push(output);
    }

    assert_eq!(outcomes(&collected).len(), 1);

    // Each accepted digit grows the masked entry by exactly one
    let outcome_at = collected
        .iter()
        .position(|output| matches!(output, PanelOutput::Outcome { .. }))
        .unwrap();
    let masked_lengths: Vec<usize> = collected[..outcome_at]
        .iter()
        .filter_map(|output| match output {
            PanelOutput::Display(text) if !text.is_empty() => Some(text.chars().count()),
            _ => None,
        })
        .collect();
    assert_eq!(masked_lengths, vec![1, 2, 3, 4]);

    // Submit clears the entry, then reports once, then shows the banner
    let last_clear = collected
        .iter()
        .rposition(|output| *output == PanelOutput::Display(String::new()))
        .unwrap();
    assert_eq!(last_clear + 1, outcome_at);
    assert_eq!(outcomes(&collected[last_clear..]).len(), 1);
    assert_eq!(collected.len(), outcome_at + 2);
    assert!(matches!(
        &collected[outcome_at + 1],
        PanelOutput::Display(text) if text.starts_with("Password ")
    ));
}

#[tokio::test]
async fn test_demo_config_and_script() {
    let demo = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demo");
    let config = PanelConfig::load(&demo.join("panel.toml")).unwrap();
    let contents = std::fs::read_to_string(demo.join("unlock.txt")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    let outputs = run_script(&config, &lines).await;

    assert_eq!(outcomes(&outputs), vec![false, true]);
}

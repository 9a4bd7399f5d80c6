//! # Pulse CLI
//!
//! Thin driver for the Pulse session layer: pings the twin service,
//! fetches a prescription for the chosen goal, and optionally previews the
//! stress dose of a sample session.
//!
//! Usage: `pulse [goal] [--simulate]` with the service base URL in
//! `PULSE_API_URL`.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pulse_core::{Modality, WorkoutLog, GOAL_CHOICES};
use pulse_session::view::{DoseView, PrescriptionView, StateView};
use pulse_session::Session;
use pulse_transport::{HttpTransport, TransportConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let simulate = args.iter().any(|arg| arg == "--simulate");
    let goal = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| "General".to_string());

    if !GOAL_CHOICES.contains(&goal.as_str()) {
        info!(goal = %goal, "goal is not one of the suggested choices; sending as-is");
    }

    let transport = HttpTransport::new(TransportConfig::from_env())
        .context("failed to build HTTP transport")?;
    let session = Session::new(transport, goal.clone());

    let status = session
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("twin service unreachable: {}", e))?;
    info!(status = %status, "twin service is up");

    session.refresh_prescription(&goal).await;
    match session.prescription().await {
        Some(prescription) => print_prescription(&PrescriptionView::from(&prescription)),
        None => {
            if let Some(error) = session.last_error().await {
                eprintln!("prescription unavailable: {}", error);
            }
        }
    }

    if simulate {
        let log = WorkoutLog::builder()
            .modality(Modality::Strength)
            .duration_minutes(45)
            .session_rpe(7)
            .sleep_quality(5)
            .life_stress_inverse(5)
            .avg_rir(2)
            .build()
            .context("sample log is invalid")?;

        session.simulate_dose(&log).await;
        match session.dose().await {
            Some(dose) => print_dose(&DoseView::from(&dose)),
            None => {
                if let Some(error) = session.last_error().await {
                    eprintln!("simulation failed: {}", error);
                }
            }
        }
    }

    if let Some(state) = session.state().await {
        print_state(&StateView::from(&state));
    }

    session.close();
    Ok(())
}

fn print_prescription(view: &PrescriptionView) {
    println!("Next session: {} ({})", view.session_type, view.duration_label);
    println!("  focus:     {}", view.focus);
    println!("  rationale: {}", view.rationale);
}

fn print_dose(view: &DoseView) {
    println!("Simulated stress dose:");
    println!("  metabolic:               {:.1}", view.metabolic);
    println!("  neuromuscular (periph.): {:.1}", view.neuromuscular_peripheral);
    println!("  neuromuscular (central): {:.1}", view.neuromuscular_central);
    println!("  structural damage:       {:.1}", view.structural_damage);
    println!("  structural signal:       {:.1}", view.structural_signal);
}

fn print_state(view: &StateView) {
    println!("State vector as of {}:", view.timestamp);
    println!("  metabolic fatigue:  {:.0}%", view.metabolic_fatigue_pct);
    println!("  peripheral fatigue: {:.0}%", view.peripheral_fatigue_pct);
    println!("  central fatigue:    {:.0}%", view.central_fatigue_pct);
    println!("  structural fatigue: {:.0}%", view.structural_fatigue_pct);
    println!("  habit strength:     {:.0}%", view.habit_strength_pct);
    for skill in &view.skills {
        println!("  skill {:<20} {:.0}%", skill.name, skill.proficiency_pct);
    }
}

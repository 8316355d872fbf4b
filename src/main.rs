use clap::Parser;
use medal_draft::core::countries;
use medal_draft::utils::{logger, validation::Validate};
use medal_draft::{
    CliConfig, DraftEngine, LocalStorage, MedalRecord, RankedParticipant, ScoreboardPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting medal-draft CLI");

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Some(name) = config.pipeline_name() {
        tracing::info!("Pipeline: {}", name);
    }
    if cli.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.load.output_path.clone());
    let pipeline = ScoreboardPipeline::new(storage, config);
    let engine = DraftEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            print_scoreboard(&summary.result.scoreboard);
            print_standings(&summary.result.standings);
            println!("✅ Scoreboard updated ({} countries in source table)", summary.result.record_count);
            println!("📁 Output saved to: {}", summary.output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Pipeline run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn print_scoreboard(scoreboard: &[RankedParticipant]) {
    let name_width = scoreboard
        .iter()
        .map(|r| r.score.participant.len())
        .max()
        .unwrap_or(11)
        .max("Participant".len());

    println!("\nDraft Scoreboard");
    println!(
        "{:>4}  {:<name_width$}  {:>4} {:>6} {:>6} {:>5} {:>5}",
        "Rank", "Participant", "Gold", "Silver", "Bronze", "Total", "Score"
    );
    for row in scoreboard {
        let s = &row.score;
        println!(
            "{:>4}  {:<name_width$}  {:>4} {:>6} {:>6} {:>5} {:>5}",
            row.rank, s.participant, s.gold, s.silver, s.bronze, s.total, s.score
        );
    }
}

fn print_standings(standings: &[MedalRecord]) {
    let country_width = standings
        .iter()
        .map(|r| r.country.len())
        .max()
        .unwrap_or(7)
        .max("Country".len());

    println!("\nDrafted Country Standings");
    println!(
        "{:>4}  {:<country_width$}  {:<3}  {:>4} {:>6} {:>6} {:>5}",
        "Rank", "Country", "IOC", "Gold", "Silver", "Bronze", "Total"
    );
    for record in standings {
        println!(
            "{:>4}  {:<country_width$}  {:<3}  {:>4} {:>6} {:>6} {:>5}",
            record.rank,
            record.country,
            countries::ioc_code(&record.country).unwrap_or(""),
            record.gold,
            record.silver,
            record.bronze,
            record.total
        );
    }
    println!();
}

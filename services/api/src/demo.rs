use chrono::{Local, NaiveDate};
use clap::Args;
use hirenova::error::AppError;
use hirenova::screening::{
    available_dates, available_times, MockAnalysisService, ScreeningSession, SelectedFile,
    SessionError, SortOrder, UploadSlot,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date for the availability window (YYYY-MM-DD).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Filter the candidate listing by name or skill.
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Sort the listing by ascending match score instead of descending.
    #[arg(long)]
    pub(crate) ascending: bool,
    /// Skip the artificial analysis delay.
    #[arg(long)]
    pub(crate) instant: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AvailabilityArgs {
    /// Start of the booking window (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        search,
        ascending,
        instant,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let analysis = if instant {
        MockAnalysisService::instant()
    } else {
        MockAnalysisService::default()
    };

    println!("Resume screening demo");

    let mut session = ScreeningSession::new();
    println!("\nUpload wizard");
    println!("- step: {}", session.step().label());
    session.add_files(
        UploadSlot::JobDescription,
        vec![SelectedFile::new("senior-frontend-developer.pdf", 48_211)],
    )?;
    println!("  uploaded senior-frontend-developer.pdf");
    session.advance()?;
    println!("- step: {}", session.step().label());
    session.add_files(
        UploadSlot::Resumes,
        vec![
            SelectedFile::new("alex-johnson.pdf", 102_400),
            SelectedFile::new("jamie-smith.docx", 88_064),
            SelectedFile::new("morgan-williams.pdf", 95_232),
        ],
    )?;
    println!("  uploaded 3 resumes");
    session.advance()?;
    println!("- step: {}", session.step().label());

    if instant {
        println!("\nAnalyzing documents (instant)...");
    } else {
        println!(
            "\nAnalyzing documents ({}s simulated delay)...",
            analysis.latency().as_secs()
        );
    }
    session.process(&analysis).await?;

    let job = session.job()?;
    println!("\nJob posting: {}", job.title);
    if let (Some(company), Some(location)) = (&job.company, &job.location) {
        println!("{} | {}", company, location);
    }
    println!("{}", job.summary);
    println!("Required skills:");
    for skill in &job.required_skills {
        println!("- {} ({})", skill.name, skill.importance.label());
    }

    let listing = session.listing_mut()?;
    if let Some(term) = search {
        listing.set_search(term);
    }
    if ascending {
        listing.set_order(SortOrder::Ascending);
    }

    let view = listing.view();
    println!("\nCandidates ({} matching)", view.matches);
    if view.empty {
        println!("No candidates match the current search.");
    }
    for row in &view.rows {
        let skills: Vec<&str> = row.skills.iter().map(|s| s.name.as_str()).collect();
        let more = if row.hidden_skills > 0 {
            format!(" +{} more", row.hidden_skills)
        } else {
            String::new()
        };
        println!(
            "- {} | score {} | {}{}",
            row.name,
            row.match_score,
            skills.join(", "),
            more
        );
    }

    println!("\nShortlist");
    let board = session.board_mut()?;
    let first_id = match board.candidates().first() {
        Some(candidate) => candidate.id.clone(),
        None => return Ok(()),
    };

    let dates = available_dates(today);
    let times = available_times();
    if let (Some(date), Some(time)) = (dates.first(), times.first()) {
        let interview = board
            .schedule(&first_id, Some(date.value), Some(time.value))
            .map_err(SessionError::Schedule)?;
        println!(
            "Booked the top candidate for {} at {}",
            interview.date.format("%a, %b %-d"),
            interview.time.format("%-I:%M %p")
        );
    }

    for card in board.cards() {
        let more = if card.more_matched_skills { " +more" } else { "" };
        let booking = match &card.interview {
            Some(interview) => format!(
                " | interview {} {}",
                interview.date.format("%a, %b %-d"),
                interview.time.format("%-I:%M %p")
            ),
            None => String::new(),
        };
        println!(
            "- {} | score {} | matched: {}{}{}",
            card.name,
            card.match_score,
            card.top_matched_skills.join(", "),
            more,
            booking
        );
    }

    Ok(())
}

pub(crate) fn run_availability(args: AvailabilityArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("Interview availability from {}", today);
    println!("\nDates (weekends excluded)");
    for date in available_dates(today) {
        println!("- {}", date.label);
    }

    println!("\nTimes");
    for slot in available_times() {
        println!("- {}", slot.label);
    }

    Ok(())
}

use std::{
    io::{self, BufRead, Write},
    sync::Arc,
    time::Duration,
};

use duel_client::{
    cancel_pair, HttpBackend, MatchSearch, Outcome, PollPolicy, Question, SessionError,
    SessionService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let backend = Arc::new(HttpBackend::from_env());
    let mut session = SessionService::with_policy(backend, PollPolicy::from_env());

    let stdin = io::stdin();
    loop {
        let name = prompt(&stdin, "Player name: ")?;
        match session.login(&name).await {
            Ok(()) => break,
            Err(SessionError::EmptyName) => eprintln!("A name is required."),
            Err(err) => eprintln!("Login failed: {}", err),
        }
    }
    print_profile(&session);

    loop {
        // Matchmaking: the backend has no push channel, so keep asking.
        loop {
            match session.find_match().await {
                Ok(MatchSearch::Paired) => break,
                Ok(MatchSearch::Waiting) => {
                    println!("Waiting for an opponent...");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
                Err(err) => {
                    eprintln!("Matchmaking failed: {}", err);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }

        let questions: Vec<Question> = session
            .questions()
            .map(<[Question]>::to_vec)
            .unwrap_or_default();
        loop {
            for (index, question) in questions.iter().enumerate() {
                let answer = prompt(&stdin, &format!("{}. {} = ", index + 1, question.text))?;
                session.set_answer(index, &answer)?;
            }
            match session.submit().await {
                Ok(()) => break,
                Err(SessionError::Answer(err)) => eprintln!("{}. Try again.", err),
                Err(err) => eprintln!("Submission failed: {}", err),
            }
        }

        println!("Waiting for your opponent to finish (Ctrl-C to give up)...");
        let (handle, token) = cancel_pair();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.cancel();
            }
        });

        let result = match session.await_result(&token).await {
            Ok(result) => result,
            Err(err) => {
                eprintln!("No result: {}", err);
                return Ok(());
            }
        };

        println!("Your score: {}", result.own_score);
        println!("Opponent score: {}", result.opponent_score);
        println!(
            "{}",
            match result.outcome() {
                Outcome::Win => "You win!",
                Outcome::Loss => "You lose!",
                Outcome::Tie => "It's a tie!",
            }
        );
        print_profile(&session);

        let again = prompt(&stdin, "Play again? [y/N] ")?;
        if !again.eq_ignore_ascii_case("y") {
            return Ok(());
        }
        session.reset()?;
    }
}

fn print_profile(session: &SessionService) {
    if let Some(profile) = session.profile() {
        println!(
            "{} | level {} | {} wins, {} losses, {} games",
            profile.name,
            profile.level,
            profile.total_wins,
            profile.total_losses,
            profile.total_games
        );
    }
}

fn prompt(stdin: &io::Stdin, text: &str) -> anyhow::Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use saga::build_info;
use saga::character::{available_skills, CharacterForm};
use saga::core::EngineConfig;
use saga::narrative::GeminiNarrator;
use saga::persistence::JsonFileStore;
use saga::rules::WorldView;
use saga::session::{GamePhase, GameSession, Notification};

type Session = GameSession<GeminiNarrator, JsonFileStore, StdRng>;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Saga - narrative RPG engine\n");
                println!("Usage: saga [--version | --help]\n");
                println!("Environment:");
                println!("  GEMINI_API_KEY          Key for the narrative service");
                println!("  SAGA_DATA_DIR           Where saves and templates live (default ~/.saga)");
                println!("  SAGA_NARRATIVE_MODEL    Model name override");
                println!("  RUST_LOG                Log filter (default saga=info)");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'saga --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("saga=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig::from_env();
    let store = JsonFileStore::open(&config.data_dir).map_err(io::Error::other)?;
    tracing::info!(dir = %store.dir().display(), "profile store opened");
    let mut board = NotificationBoard::new(Duration::from_secs(config.notification_ttl_secs));
    let narrator = GeminiNarrator::new(config.narrative.clone());
    let mut session = GameSession::new(config, narrator, store, StdRng::from_entropy());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        board.post(session.drain_notifications(), Instant::now());
        board.show(Instant::now());
        render(&session);
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input == "quit" {
            break;
        }
        if let Err(e) = handle(&mut session, input, &mut lines) {
            println!("! {}", e);
        }
    }
    Ok(())
}

/// Notifications stay on screen until their ttl runs out.
struct NotificationBoard {
    ttl: Duration,
    posted: Vec<(Instant, Notification)>,
}

impl NotificationBoard {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            posted: Vec::new(),
        }
    }

    fn post(&mut self, notifications: Vec<Notification>, now: Instant) {
        self.posted.extend(notifications.into_iter().map(|n| (now, n)));
    }

    fn visible(&mut self, now: Instant) -> impl Iterator<Item = &Notification> {
        let ttl = self.ttl;
        self.posted
            .retain(|(posted_at, _)| now.saturating_duration_since(*posted_at) < ttl);
        self.posted.iter().map(|(_, n)| n)
    }

    fn show(&mut self, now: Instant) {
        for notification in self.visible(now) {
            println!("[{}] {}", notification.title(), notification.message());
        }
    }
}

fn render(session: &Session) {
    match session.phase() {
        GamePhase::Welcome => {
            println!("\n== {} ==", build_info::version_line());
            println!("new | load | achievements | export <file> | import <file> | quit");
        }
        GamePhase::WorldSelection => {
            for (i, world) in WorldView::ALL.iter().enumerate() {
                println!("{}. {}", i + 1, world.name());
            }
        }
        GamePhase::CharacterCreation => {
            if let Some(world) = session.selected_world() {
                println!("Classes: {}", world.classes().join(", "));
            }
            for template in session.templates() {
                println!("  template {}: {} ({})", template.id, template.name, template.class);
            }
            println!("create | template <id> | save-template | reset");
        }
        GamePhase::Playing => {
            if let Some(last) = session.story().last() {
                println!("\n{}\n", last);
            }
            for (i, choice) in session.choices().iter().enumerate() {
                println!("{}. {}", i + 1, choice);
            }
            println!("<number> | save | reset");
        }
        GamePhase::Combat => {
            if let (Some(character), Some(encounter)) = (session.character(), session.encounter()) {
                if let Some(turn) = session.last_turn() {
                    println!("\n{}\n", turn.narration());
                } else if let Some(last) = session.story().last() {
                    println!("\n{}\n", last);
                }
                println!(
                    "You {}/{} HP | {} {}/{} HP",
                    character.hp,
                    character.max_hp,
                    encounter.enemy_name,
                    encounter.enemy_hp,
                    encounter.enemy_max_hp
                );
                if session.context().pending_victory().is_some() {
                    println!("continue");
                } else {
                    let skills: Vec<String> = available_skills(character)
                        .into_iter()
                        .map(|s| format!("{} ({})", s.id, s.name))
                        .collect();
                    println!("attack | skill <id>: {}", skills.join(", "));
                }
            }
        }
        GamePhase::Ended => {
            if let Some(last) = session.story().last() {
                println!("\n{}\n", last);
            }
            println!("The End. save | reset");
        }
        GamePhase::Dead => println!("You died. reset"),
        GamePhase::Error => {
            println!("{}", session.error_message().unwrap_or("Unknown error"));
            println!("reset");
        }
        GamePhase::LoadGame => {
            for save in session.saves() {
                println!(
                    "  {} - {} ({:?}, {} lines)",
                    save.id,
                    save.character.name,
                    save.save_type,
                    save.story.len()
                );
            }
            println!("load <id> | delete <id> | restart <id> | reset");
        }
        GamePhase::Achievements => {
            let achievements = session.achievements();
            println!(
                "{}/{} unlocked ({:.0}%)",
                achievements.unlocked_count(),
                achievements.total_count(),
                achievements.unlock_percentage()
            );
            for id in achievements.iter() {
                println!("  {}", id.key());
            }
            println!("reset");
        }
    }
}

fn prompt_line(
    label: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    Ok(lines.next().transpose()?.unwrap_or_default())
}

fn read_form(
    prefill: Option<CharacterForm>,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<CharacterForm> {
    let prefill = prefill.unwrap_or_default();
    let keep = |typed: String, old: &str| {
        if typed.trim().is_empty() {
            old.to_string()
        } else {
            typed
        }
    };
    let name = keep(prompt_line("Name", lines)?, &prefill.name);
    let class = keep(prompt_line("Class", lines)?, &prefill.class);
    let backstory = keep(prompt_line("Backstory", lines)?, &prefill.backstory);
    Ok(CharacterForm::new(&name, &class, &backstory))
}

fn handle(
    session: &mut Session,
    input: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (command, arg) = input.split_once(' ').unwrap_or((input, ""));
    match (session.phase(), command) {
        (_, "reset") => session.reset(),
        (GamePhase::Welcome, "new") => session.start()?,
        (GamePhase::Welcome, "load") => session.open_load_game()?,
        (GamePhase::Welcome, "achievements") => session.open_achievements()?,
        (GamePhase::Welcome, "export") => std::fs::write(arg, session.export_json()?)?,
        (GamePhase::Welcome, "import") => {
            let text = std::fs::read_to_string(arg)?;
            session.import_backup_json(&text)?;
        }
        (GamePhase::WorldSelection, n) => {
            let world = n
                .parse::<usize>()
                .ok()
                .and_then(|i| WorldView::ALL.get(i.wrapping_sub(1)).copied())
                .ok_or("pick a world by number")?;
            session.select_world(world)?;
        }
        (GamePhase::CharacterCreation, "create") => {
            let form = read_form(None, lines)?;
            session.create_character(&form)?;
        }
        (GamePhase::CharacterCreation, "template") => {
            let prefill = session.template_form(arg)?;
            let form = read_form(Some(prefill), lines)?;
            session.create_character(&form)?;
        }
        (GamePhase::CharacterCreation, "save-template") => {
            let form = read_form(None, lines)?;
            session.save_template(&form)?;
        }
        (GamePhase::Playing | GamePhase::Ended, "save") => {
            session.manual_save()?;
        }
        (GamePhase::Playing, n) => {
            let choice = n
                .parse::<usize>()
                .ok()
                .and_then(|i| session.choices().get(i.wrapping_sub(1)).cloned())
                .unwrap_or_else(|| input.to_string());
            session.choose(&choice)?;
        }
        (GamePhase::Combat, "attack") => {
            session.attack()?;
        }
        (GamePhase::Combat, "skill") => {
            session.use_skill(arg)?;
        }
        (GamePhase::Combat, "continue") => session.continue_after_combat()?,
        (GamePhase::LoadGame, "load") => session.load_game(arg)?,
        (GamePhase::LoadGame, "delete") => session.delete_save(arg)?,
        (GamePhase::LoadGame, "restart") => session.start_from_character(arg)?,
        _ => println!("?"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(message: &str) -> Notification {
        Notification::Info(message.to_string())
    }

    #[test]
    fn test_board_drops_notifications_after_ttl() {
        let start = Instant::now();
        let mut board = NotificationBoard::new(Duration::from_secs(5));
        board.post(vec![info("first")], start);
        board.post(vec![info("second")], start + Duration::from_secs(3));

        assert_eq!(board.visible(start + Duration::from_secs(4)).count(), 2);
        let left: Vec<String> = board
            .visible(start + Duration::from_secs(5))
            .map(|n| n.message())
            .collect();
        assert_eq!(left, vec!["second".to_string()]);
        assert_eq!(board.visible(start + Duration::from_secs(8)).count(), 0);
    }
}

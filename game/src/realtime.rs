//! Wall-clock driver
//!
//! Runs a [`CombatEngine`] in real time. Scheduled tasks fire when their
//! deadline passes on the tokio clock, and player commands arriving over a
//! channel are applied at the moment they are received.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

use conductor_battle::log;
use conductor_battle::{
    CardKind, CombatEngine, CombatEvent, CombatResult, GameResult, HoldChoice, Millis, UnitRef,
};

/// A player input during combat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectCard(CardKind),
    TargetClick(UnitRef),
    Conduct {
        card: CardKind,
        target: Option<UnitRef>,
    },
    Hold(HoldChoice),
    Resolve,
}

impl Command {
    pub fn apply(&self, engine: &mut CombatEngine) -> GameResult<()> {
        match *self {
            Command::SelectCard(kind) => engine.select_card(kind),
            Command::TargetClick(target) => engine.target_click(target),
            Command::Conduct { card, target } => engine.conduct(card, target),
            Command::Hold(choice) => engine.hold(choice),
            Command::Resolve => engine.resolve(),
        }
    }
}

fn forward(engine: &mut CombatEngine, events: &mpsc::UnboundedSender<CombatEvent>) {
    for event in engine.take_events() {
        if events.send(event).is_err() {
            log::debug("realtime", "event receiver dropped");
        }
    }
}

/// Drives a started combat until every scheduled task has run, including the
/// closing announcement. Rejected commands are logged and otherwise ignored.
pub async fn drive_combat(
    engine: &mut CombatEngine,
    commands: &mut mpsc::Receiver<Command>,
    events: &mpsc::UnboundedSender<CombatEvent>,
) -> Option<CombatResult> {
    let anchor = Instant::now();
    let base = engine.now();
    let elapsed = |at: Instant| -> Millis { base + at.duration_since(anchor).as_millis() as Millis };
    let mut listening = true;

    loop {
        forward(engine, events);
        let Some(deadline) = engine.next_deadline() else {
            break;
        };
        let wake = anchor + Duration::from_millis(deadline.saturating_sub(base));

        tokio::select! {
            _ = sleep_until(wake) => engine.advance_to(deadline),
            command = commands.recv(), if listening => match command {
                Some(command) => {
                    engine.advance_to(elapsed(Instant::now()));
                    if let Err(e) = command.apply(engine) {
                        log::warn(&format!("{:?} rejected: {}", command, e));
                    }
                }
                None => listening = false,
            },
        }
    }

    forward(engine, events);
    engine.combat().result
}

#[cfg(test)]
mod tests {
    use super::*;
    use conductor_battle::{Campaign, CombatEngine, UnitTemplate};

    fn create_engine() -> CombatEngine {
        let mut campaign = Campaign::new();
        let big = campaign.mint_unit(UnitTemplate::new("big", "Big", 10, 10, 35));
        campaign.board.push(big);
        let small = campaign.mint_unit(UnitTemplate::new("small", "Small", 1, 1, 35));
        campaign.enemy_board.push(small);
        CombatEngine::new(campaign, conductor_assets::default_catalog(), 7)
    }

    #[tokio::test(start_paused = true)]
    async fn test_drives_unattended_combat_on_wall_time() {
        let mut engine = create_engine();
        engine.start_combat().unwrap();
        let (tx, mut commands) = mpsc::channel(8);
        drop(tx);
        let (events, mut received) = mpsc::unbounded_channel();

        let started = Instant::now();
        let result = drive_combat(&mut engine, &mut commands, &events).await;

        assert_eq!(result, Some(CombatResult::Win));
        // Window closes at 4400, final tick at 5300, announcement 700 later.
        assert!(started.elapsed() >= Duration::from_millis(6000));

        let mut saw_announcement = false;
        while let Ok(event) = received.try_recv() {
            if matches!(event, CombatEvent::Announcement(_)) {
                saw_announcement = true;
            }
        }
        assert!(saw_announcement);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_command_preempts_window() {
        let mut engine = create_engine();
        engine.start_combat().unwrap();
        let (tx, mut commands) = mpsc::channel(8);
        let (events, mut received) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1300)).await;
            tx.send(Command::Hold(HoldChoice::Gold)).await.ok();
        });

        let started = Instant::now();
        let result = drive_combat(&mut engine, &mut commands, &events).await;

        assert_eq!(result, Some(CombatResult::Win));
        assert_eq!(engine.campaign.pending_gold, 1);
        // Resolved at 2100 rather than 4400, so the run ends well before 6000.
        assert!(started.elapsed() < Duration::from_millis(4500));

        let mut held = false;
        while let Ok(event) = received.try_recv() {
            if matches!(event, CombatEvent::Held { choice: HoldChoice::Gold }) {
                held = true;
            }
        }
        assert!(held);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_command_keeps_combat_running() {
        let mut engine = create_engine();
        engine.start_combat().unwrap();
        let (tx, mut commands) = mpsc::channel(8);
        let (events, _received) = mpsc::unbounded_channel();

        // Before the first window opens, so the engine refuses it.
        tx.send(Command::Hold(HoldChoice::Insight)).await.unwrap();
        drop(tx);

        let result = drive_combat(&mut engine, &mut commands, &events).await;
        assert_eq!(result, Some(CombatResult::Win));
        assert_eq!(engine.campaign.insight, 0);
    }

    #[tokio::test]
    async fn test_idle_engine_returns_immediately() {
        let mut engine = create_engine();
        let (_tx, mut commands) = mpsc::channel(1);
        let (events, _received) = mpsc::unbounded_channel();
        assert_eq!(drive_combat(&mut engine, &mut commands, &events).await, None);
    }
}

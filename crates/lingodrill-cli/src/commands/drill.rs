//! The `lingodrill drill` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use rand::seq::SliceRandom;
use tokio::sync::mpsc;

use lingodrill_content::config::load_config_from;
use lingodrill_core::drills::{
    arrange_vocab, check_lesson_choice, check_role_play, check_translation, check_typing,
    lesson_choice_answer, ArrangeWords, ChoiceQuestion, ChoiceTarget, Cloze, Flashcard,
    MatchBoard, StreakRun, StudyOrder,
};
use lingodrill_core::model::{Language, SentenceItem, VocabItem};
use lingodrill_core::normalize::group_by_lesson;
use lingodrill_core::session::{SessionStats, SessionTelemetry};
use lingodrill_core::timer::TokioClock;

use crate::console::spawn_stdin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrillKind {
    Typing,
    Streak,
    Flashcard,
    Choice,
    Pinyin,
    Match,
    Translate,
    Cloze,
    Arrange,
    Lesson,
    RolePlay,
}

impl DrillKind {
    fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "typing" => Self::Typing,
            "streak" => Self::Streak,
            "flashcard" => Self::Flashcard,
            "choice" => Self::Choice,
            "pinyin" => Self::Pinyin,
            "match" => Self::Match,
            "translate" => Self::Translate,
            "cloze" => Self::Cloze,
            "arrange" => Self::Arrange,
            "lesson" => Self::Lesson,
            "role-play" => Self::RolePlay,
            other => anyhow::bail!(
                "unknown drill '{other}' (expected typing, streak, flashcard, choice, pinyin, match, translate, cloze, arrange, lesson or role-play)"
            ),
        })
    }

    fn id(self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::Streak => "streak",
            Self::Flashcard => "flashcard",
            Self::Choice => "choice",
            Self::Pinyin => "pinyin",
            Self::Match => "match",
            Self::Translate => "translate",
            Self::Cloze => "cloze",
            Self::Arrange => "arrange",
            Self::Lesson => "lesson",
            Self::RolePlay => "role-play",
        }
    }

    fn uses_vocab(self) -> bool {
        matches!(
            self,
            Self::Typing | Self::Streak | Self::Flashcard | Self::Choice | Self::Pinyin | Self::Match
        )
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    pools_dir: PathBuf,
    kind: String,
    units: Option<String>,
    order: String,
    lesson: Option<String>,
    track: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let kind = DrillKind::parse(&kind)?;
    let order = match order.as_str() {
        "sequential" => StudyOrder::Sequential,
        "random" => StudyOrder::Random,
        other => anyhow::bail!("unknown order '{other}' (expected sequential or random)"),
    };
    let config = load_config_from(config_path.as_deref())?;
    let pools = super::load_snapshot(&pools_dir, &config).await?;

    let mut session = DrillSession::new(super::telemetry(track, &config)?);
    if let Some(t) = session.telemetry.as_mut() {
        t.start(kind.id()).await;
    }

    let mut rng = rand::thread_rng();
    if kind.uses_vocab() {
        let vocabs = pools.vocabs.items().unwrap_or_default();
        let units = match units {
            Some(list) => list.split(',').map(|s| s.trim().to_string()).collect(),
            None => distinct_units(vocabs),
        };
        let items = arrange_vocab(vocabs, &units, order, &mut rng);
        anyhow::ensure!(!items.is_empty(), "no vocabulary in the selected units");
        println!("{} drill: {} words", kind.id(), items.len());

        match kind {
            DrillKind::Typing => typing(&mut session, &items).await,
            DrillKind::Streak => streak(&mut session, &items).await,
            DrillKind::Flashcard => flashcards(&mut session, &items).await,
            DrillKind::Choice => choice(&mut session, &items, vocabs, ChoiceTarget::Hanzi).await,
            DrillKind::Pinyin => choice(&mut session, &items, vocabs, ChoiceTarget::Pinyin).await,
            _ => match_boards(&mut session, &items).await,
        }
    } else {
        let sentences = pools.sentences.items().unwrap_or_default();
        let mut sentences = lesson_sentences(sentences, lesson.as_deref())?;
        if order == StudyOrder::Random {
            sentences.shuffle(&mut rng);
        }
        println!("{} drill: {} sentences", kind.id(), sentences.len());

        match kind {
            DrillKind::Translate => translate(&mut session, &sentences).await,
            DrillKind::Cloze => cloze(&mut session, &sentences).await,
            DrillKind::Arrange => arrange(&mut session, &sentences).await,
            DrillKind::RolePlay => role_play(&mut session, &sentences).await,
            _ => lesson_choice(&mut session, &sentences).await,
        }
    }

    if let Some(t) = session.telemetry.as_mut() {
        t.complete().await;
    }
    session.print_summary();
    Ok(())
}

/// Unit tags in first-seen order.
fn distinct_units(vocabs: &[VocabItem]) -> Vec<String> {
    let mut units: Vec<String> = Vec::new();
    for tag in vocabs.iter().filter_map(|v| v.unit_tag.as_ref()) {
        if !units.contains(tag) {
            units.push(tag.clone());
        }
    }
    units
}

/// Sentences of the lesson matching `lesson` by id or title, or every
/// sentence when no lesson is given.
fn lesson_sentences(sentences: &[SentenceItem], lesson: Option<&str>) -> Result<Vec<SentenceItem>> {
    let Some(wanted) = lesson else {
        anyhow::ensure!(!sentences.is_empty(), "the sentence pool is empty");
        return Ok(sentences.to_vec());
    };
    let groups = group_by_lesson(sentences);
    match groups
        .into_iter()
        .find(|g| g.lesson_id == wanted || g.title == wanted)
    {
        Some(group) => Ok(group.sentences),
        None => anyhow::bail!("lesson '{wanted}' not found"),
    }
}

/// Stdin, counters and optional telemetry for one drill run.
struct DrillSession {
    inputs: mpsc::Receiver<String>,
    clock: TokioClock,
    stats: SessionStats,
    telemetry: Option<SessionTelemetry>,
    kind: &'static str,
}

impl DrillSession {
    fn new(telemetry: Option<SessionTelemetry>) -> Self {
        let clock = TokioClock;
        Self {
            inputs: spawn_stdin(|line| line.trim().to_string()),
            stats: SessionStats::new(&clock),
            clock,
            telemetry,
            kind: "",
        }
    }

    /// Next line, or `None` once the learner quits or input ends.
    async fn ask(&mut self) -> Option<String> {
        let line = self.inputs.recv().await?;
        (line != ":q" && line != ":quit").then_some(line)
    }

    async fn record(&mut self, item_id: &str, answer: &str, correct: bool, expected: &str) {
        if correct {
            println!("  Correct!");
        } else {
            println!("  Wrong. Answer: {expected}");
        }
        self.stats.record(correct);
        if let Some(t) = &self.telemetry {
            t.answer(item_id, self.kind, answer, correct).await;
        }
    }

    fn print_summary(&self) {
        let mut table = Table::new();
        table.set_header(vec!["Answered", "Correct", "Incorrect", "Accuracy", "Best streak", "Time"]);
        table.add_row(vec![
            Cell::new(self.stats.total),
            Cell::new(self.stats.correct),
            Cell::new(self.stats.incorrect),
            Cell::new(format!("{}%", self.stats.accuracy())),
            Cell::new(self.stats.best_streak),
            Cell::new(format!("{}s", self.stats.elapsed(&self.clock).as_secs())),
        ]);
        println!("\n{table}");
    }
}

fn print_options(options: &[String]) {
    for (i, option) in options.iter().enumerate() {
        println!("    {}. {option}", i + 1);
    }
}

/// An option typed by number or by text.
fn pick_option<'a>(options: &'a [String], input: &'a str) -> &'a str {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| options.get(n.checked_sub(1)?))
        .map_or(input, String::as_str)
}

/// Parse whitespace-separated 1-based numbers.
fn numbers(input: &str) -> Vec<usize> {
    input
        .split_whitespace()
        .filter_map(|s| s.parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .collect()
}

async fn typing(session: &mut DrillSession, items: &[VocabItem]) {
    session.kind = "vocab";
    for vocab in items {
        println!("\n{} ({})", vocab.meaning, vocab.pinyin);
        let Some(answer) = session.ask().await else { return };
        let correct = check_typing(vocab, &answer);
        session.record(&vocab.id, &answer, correct, &vocab.hanzi).await;
    }
}

async fn streak(session: &mut DrillSession, items: &[VocabItem]) {
    session.kind = "vocab";
    println!("One wrong answer ends the streak.");
    let mut run = StreakRun::new();
    for vocab in items {
        println!("\n{} ({})  [streak {}]", vocab.meaning, vocab.pinyin, run.streak());
        let Some(answer) = session.ask().await else { break };
        let correct = run.answer(vocab, &answer).unwrap_or(false);
        session.record(&vocab.id, &answer, correct, &vocab.hanzi).await;
        if run.is_broken() {
            break;
        }
    }
    println!("\nYou kept {} correct answer(s) in a row.", run.streak());
}

async fn flashcards(session: &mut DrillSession, items: &[VocabItem]) {
    session.kind = "vocab";
    println!("Press enter to turn a card over, then answer y or n.");
    for vocab in items {
        let mut card = Flashcard::new(vocab, Language::Vi);
        println!("\n{}", card.front());
        if session.ask().await.is_none() {
            return;
        }
        println!("  {}", card.reveal());
        println!("  Did you know it? [y/n]");
        let Some(input) = session.ask().await else { return };
        if let Ok(correct) = card.assess(knew_it(&input)) {
            session.stats.record(correct);
            if let Some(t) = &session.telemetry {
                t.answer(&card.vocab_id, "vocab", &input, correct).await;
            }
        }
    }
}

fn knew_it(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "y" | "yes" | "c" | "có")
}

async fn choice(session: &mut DrillSession, items: &[VocabItem], pool: &[VocabItem], target: ChoiceTarget) {
    session.kind = "vocab";
    let mut rng = rand::thread_rng();
    for vocab in items {
        let question = ChoiceQuestion::build(vocab, pool, target, &mut rng);
        println!("\n{}", question.prompt);
        print_options(&question.options);
        let Some(input) = session.ask().await else { return };
        let selected = pick_option(&question.options, &input).to_string();
        let correct = question.check(&selected);
        session.record(&question.vocab_id, &selected, correct, &question.correct).await;
    }
}

async fn match_boards(session: &mut DrillSession, items: &[VocabItem]) {
    session.kind = "match";
    let mut rng = rand::thread_rng();
    for chunk in items.chunks(lingodrill_core::drills::match_game::MAX_PAIRS) {
        let mut board = MatchBoard::new(chunk, &mut rng);
        println!("\nPair each word with its meaning: type '<word> <meaning>' numbers.");
        let outcome = loop {
            if let Some(outcome) = board.outcome() {
                break outcome;
            }
            let left: Vec<String> = board
                .left()
                .iter()
                .filter(|h| !board.links().contains_key(*h))
                .cloned()
                .collect();
            let right: Vec<String> = board.remaining_right().into_iter().map(str::to_string).collect();
            println!("  Words:    {}", numbered(&left));
            println!("  Meanings: {}", numbered(&right));

            let Some(input) = session.ask().await else { return };
            let picks = numbers(&input);
            let (Some(l), Some(r)) = (
                picks.first().and_then(|&i| left.get(i)),
                picks.get(1).and_then(|&i| right.get(i)),
            ) else {
                println!("  Type two numbers, e.g. '1 3'.");
                continue;
            };
            board.select_left(l);
            if let Some(outcome) = board.select_right(r) {
                break outcome;
            }
        };

        println!(
            "  {}/{} pairs correct",
            outcome.correct_pairs, outcome.total_pairs
        );
        session
            .stats
            .record_batch(outcome.total_pairs, outcome.correct_pairs);
        if let Some(t) = &session.telemetry {
            let answer = format!("{}/{}", outcome.correct_pairs, outcome.total_pairs);
            t.answer("match-board", "match", &answer, outcome.all_correct()).await;
        }
    }
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect::<Vec<_>>()
        .join("   ")
}

async fn translate(session: &mut DrillSession, sentences: &[SentenceItem]) {
    session.kind = "sentence";
    for sentence in sentences {
        println!("\n{}", sentence.meaning);
        let Some(answer) = session.ask().await else { return };
        let correct = check_translation(sentence, &answer);
        session.record(&sentence.id, &answer, correct, &sentence.hanzi).await;
    }
}

async fn cloze(session: &mut DrillSession, sentences: &[SentenceItem]) {
    session.kind = "sentence";
    let mut rng = rand::thread_rng();
    for sentence in sentences {
        let mut cloze = Cloze::new(&sentence.hanzi, &mut rng);
        if cloze.blank_count() == 0 {
            continue;
        }
        println!("\n{}  ({})", cloze.display(), sentence.meaning);
        println!("  Fill {} blank(s), separated by spaces.", cloze.blank_count());
        let Some(input) = session.ask().await else { return };
        let answers: Vec<&str> = input.split_whitespace().collect();
        let expected = cloze.solution().join(" ");
        let correct = cloze.check(&answers).unwrap_or(false);
        session.record(&sentence.id, &input, correct, &expected).await;
    }
}

async fn arrange(session: &mut DrillSession, sentences: &[SentenceItem]) {
    session.kind = "sentence";
    let mut rng = rand::thread_rng();
    for sentence in sentences {
        let mut words = ArrangeWords::new(&sentence.hanzi, &mut rng);
        if words.pool().len() < 2 {
            continue;
        }
        let shown = words.pool().to_vec();
        println!("\n{}", sentence.meaning);
        println!("  {}", numbered(&shown));
        println!("  Type the word numbers in order.");
        let Some(input) = session.ask().await else { return };
        for word in numbers(&input).into_iter().filter_map(|i| shown.get(i)) {
            if let Some(at) = words.pool().iter().position(|w| w == word) {
                words.pick(at);
            }
        }
        let answer = words.selected().join(" ");
        let correct = words.check().unwrap_or(false);
        session.record(&sentence.id, &answer, correct, &sentence.hanzi).await;
    }
}

async fn role_play(session: &mut DrillSession, sentences: &[SentenceItem]) {
    session.kind = "sentence";
    for sentence in sentences {
        println!("\n{}", sentence.hanzi);
        if let Some(pinyin) = &sentence.pinyin {
            println!("  ({pinyin})");
        }
        println!("  Type your reply:");
        let (reply, correct) = loop {
            let Some(reply) = session.ask().await else { return };
            if let Some(correct) = check_role_play(sentence, &reply) {
                break (reply, correct);
            }
        };
        session.record(&sentence.id, &reply, correct, &sentence.hanzi).await;
        println!("  Meaning: {}", sentence.meaning);
    }
}

async fn lesson_choice(session: &mut DrillSession, sentences: &[SentenceItem]) {
    session.kind = "sentence";
    for sentence in sentences.iter().filter(|s| s.has_options()) {
        let options = sentence.options.clone().unwrap_or_default();
        println!("\n{}", sentence.hanzi);
        if let Some(pinyin) = &sentence.pinyin {
            println!("  ({pinyin})");
        }
        print_options(&options);
        let Some(input) = session.ask().await else { return };
        let selected = pick_option(&options, &input).to_string();
        let correct = check_lesson_choice(sentence, &selected);
        session
            .record(&sentence.id, &selected, correct, lesson_choice_answer(sentence))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(id: &str, tag: Option<&str>) -> VocabItem {
        VocabItem {
            id: id.into(),
            hanzi: "字".into(),
            pinyin: "zì".into(),
            meaning: "chữ".into(),
            unit_tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn units_keep_first_seen_order() {
        let vocabs = [
            vocab("1", Some("HSK2")),
            vocab("2", None),
            vocab("3", Some("HSK1")),
            vocab("4", Some("HSK2")),
        ];
        assert_eq!(distinct_units(&vocabs), vec!["HSK2", "HSK1"]);
    }

    #[test]
    fn options_by_number_or_text() {
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(pick_option(&options, "2"), "b");
        assert_eq!(pick_option(&options, "b"), "b");
        assert_eq!(pick_option(&options, "0"), "0");
        assert_eq!(pick_option(&options, "3"), "3");
    }

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(numbers("1 3 x 0 2"), vec![0, 2, 1]);
    }

    #[test]
    fn drill_kinds_parse() {
        assert_eq!(DrillKind::parse("cloze").unwrap(), DrillKind::Cloze);
        assert!(DrillKind::parse("Cloze").is_err());
        assert!(DrillKind::Match.uses_vocab());
        assert!(!DrillKind::Lesson.uses_vocab());
        assert_eq!(DrillKind::parse("role-play").unwrap(), DrillKind::RolePlay);
        assert!(!DrillKind::RolePlay.uses_vocab());
        for kind in [DrillKind::Streak, DrillKind::Flashcard] {
            assert_eq!(DrillKind::parse(kind.id()).unwrap(), kind);
            assert!(kind.uses_vocab());
        }
    }

    #[test]
    fn flashcard_self_grade_answers() {
        assert!(knew_it("y"));
        assert!(knew_it("Yes"));
        assert!(knew_it("có"));
        assert!(!knew_it("n"));
        assert!(!knew_it(""));
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::PathBuf;

use crossterm::event::KeyCode;
use rand::rngs::mock::StepRng;
use ratatui::{backend::TestBackend, Terminal};
use rstest::{fixture, rstest};
use time::macros::{datetime, offset};

use super::{tune_row, MainAction, Session, SessionEnd, SessionError};
use crate::ceremony::CeremonyTiming;
use crate::interrupt::{self, Interrupt};
use crate::link::FixedTitle;
use crate::model::{Document, Tune, MANUAL_PROVIDER};
use crate::ops::{apply_op, Op};
use crate::store::{DataFile, StoreError};
use crate::test_utils::{buffer_text, TempDir};
use crate::tui::{ScriptedKeys, Tui, TuiTheme};

type TestSession = Session<TestBackend, ScriptedKeys, FixedTitle, StepRng>;

const RICK: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&ab_channel=X";

struct SessionTestCtx {
    _tmp: TempDir,
    path: PathBuf,
}

impl SessionTestCtx {
    fn store(&self) -> DataFile {
        DataFile::new(&self.path)
    }

    fn session(&self, doc: Document, keys: ScriptedKeys, titles: FixedTitle) -> TestSession {
        self.session_with(doc, keys, titles, Interrupt::never())
    }

    fn session_with(
        &self,
        doc: Document,
        keys: ScriptedKeys,
        titles: FixedTitle,
        interrupt: Interrupt,
    ) -> TestSession {
        self.session_on(TestBackend::new(110, 50), doc, keys, titles, interrupt)
    }

    /// A session on a classic 80x24 terminal.
    fn small_session(&self, doc: Document, keys: ScriptedKeys) -> TestSession {
        let backend = TestBackend::new(80, 24);
        self.session_on(backend, doc, keys, FixedTitle::failing(), Interrupt::never())
    }

    fn session_on(
        &self,
        backend: TestBackend,
        doc: Document,
        keys: ScriptedKeys,
        titles: FixedTitle,
        interrupt: Interrupt,
    ) -> TestSession {
        let terminal = Terminal::new(backend).expect("terminal");
        let tui = Tui::new(terminal, keys, interrupt, TuiTheme::monochrome());
        Session::new(tui, self.store(), doc, titles, StepRng::new(0, 0))
            .with_timing(CeremonyTiming::instant())
    }

    fn saved(&self) -> Document {
        self.store().load().expect("load")
    }
}

#[fixture]
fn ctx() -> SessionTestCtx {
    let tmp = TempDir::new("session");
    let path = tmp.path().join("tunesday.json");
    SessionTestCtx { _tmp: tmp, path }
}

fn roster(names: &[&str]) -> Document {
    let mut doc = Document::new();
    for name in names {
        apply_op(&mut doc, Op::AddParticipant { name: (*name).to_owned() }).unwrap();
    }
    doc
}

fn all_deactivated() -> Document {
    let mut doc = roster(&["Ann"]);
    apply_op(&mut doc, Op::ToggleParticipant { name: "Ann".to_owned() }).unwrap();
    doc
}

fn main_menu(keys: ScriptedKeys, action: MainAction) -> ScriptedKeys {
    let idx = MainAction::ALL
        .iter()
        .position(|candidate| *candidate == action)
        .expect("action");
    keys.down(idx).enter()
}

fn exit(keys: ScriptedKeys) -> ScriptedKeys {
    main_menu(keys, MainAction::Exit)
}

/// Opens the participant submenu, adds `name`, acknowledges the message and goes back.
fn add_participant(keys: ScriptedKeys, name: &str) -> ScriptedKeys {
    main_menu(keys, MainAction::ManageParticipants)
        .enter()
        .text(name)
        .enter()
        .enter()
        .key(KeyCode::Esc)
}

#[rstest]
fn exit_saves_and_ends_normally(ctx: SessionTestCtx) {
    let mut session = ctx.session(roster(&["Ann"]), exit(ScriptedKeys::new()), FixedTitle::failing());

    assert_eq!(session.run().expect("run"), SessionEnd::Exited);
    assert_eq!(ctx.saved(), roster(&["Ann"]));
}

#[rstest]
fn esc_on_main_menu_exits(ctx: SessionTestCtx) {
    let mut session = ctx.session(
        Document::new(),
        ScriptedKeys::new().key(KeyCode::Esc),
        FixedTitle::failing(),
    );

    assert_eq!(session.run().expect("run"), SessionEnd::Exited);
    assert!(ctx.path.exists());
}

#[rstest]
fn open_rejects_malformed_file(ctx: SessionTestCtx) {
    std::fs::write(&ctx.path, "{ broken").unwrap();
    let terminal = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
    let tui = Tui::new(terminal, ScriptedKeys::new(), Interrupt::never(), TuiTheme::monochrome());

    let result = Session::open(tui, ctx.store(), FixedTitle::failing(), StepRng::new(0, 0));

    assert!(matches!(result, Err(StoreError::Json { .. })));
    assert_eq!(std::fs::read_to_string(&ctx.path).unwrap(), "{ broken");
}

#[rstest]
fn participants_are_saved_right_after_each_change(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::ManageParticipants)
        .enter()
        .text("Ann")
        .enter()
        .enter()
        .ctrl('c');
    let mut session = ctx.session(Document::new(), keys, FixedTitle::failing());

    assert_eq!(session.run().expect("run"), SessionEnd::Interrupted);
    assert_eq!(ctx.saved().participant_names(), vec!["Ann".to_owned()]);
}

#[rstest]
fn duplicate_participant_is_reported_without_change(ctx: SessionTestCtx) {
    let keys = exit(add_participant(ScriptedKeys::new(), "Ann"));
    let mut doc = roster(&["Ann"]);
    apply_op(&mut doc, Op::RecordContribution { name: "Ann".to_owned() }).unwrap();
    let mut session = ctx.session(doc.clone(), keys, FixedTitle::failing());

    session.run().expect("run");

    assert_eq!(session.document(), &doc);
    assert_eq!(ctx.saved().contributions("Ann"), Some(1));
}

#[rstest]
fn ceremony_records_winner_and_tune(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::SelectProvider)
        .paste(RICK)
        .enter()
        .enter();
    let keys = exit(keys);
    let mut session = ctx.session(roster(&["Bo", "Ann"]), keys, FixedTitle::new("Never Gonna Give You Up"));

    session.run().expect("run");

    let saved = ctx.saved();
    assert_eq!(saved.contributions("Ann"), Some(1));
    assert_eq!(saved.contributions("Bo"), Some(0));
    assert_eq!(saved.tunes().len(), 1);
    let tune = &saved.tunes()[0];
    assert_eq!(tune.id(), "dQw4w9WgXcQ");
    assert_eq!(tune.provider(), "Ann");
    assert_eq!(tune.name(), "Never Gonna Give You Up");
    assert_eq!(tune.link(), RICK);
    assert!(tune.added_at().is_some());
}

#[rstest]
fn new_tunes_are_stamped_in_the_session_offset(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::SelectProvider)
        .paste(RICK)
        .enter()
        .enter();
    let mut session = ctx
        .session(roster(&["Ann"]), exit(keys), FixedTitle::new("Song"))
        .with_offset(offset!(+2));

    session.run().expect("run");

    let saved = ctx.saved();
    let added_at = saved.tunes()[0].added_at().expect("added_at");
    assert_eq!(added_at.offset(), offset!(+2));
}

#[rstest]
fn ceremony_keeps_tune_when_title_lookup_fails(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::SelectProvider)
        .paste("https://youtu.be/abc123")
        .enter();
    let mut session = ctx.session(roster(&["Ann"]), keys.enter(), FixedTitle::failing());

    // Script ends on the main menu; the terminal error still saves.
    let err = session.run().unwrap_err();

    assert!(matches!(err, SessionError::Terminal(_)));
    let saved = ctx.saved();
    assert_eq!(saved.tunes()[0].name(), "");
    assert_eq!(saved.tunes()[0].id(), "abc123");
}

#[rstest]
fn ceremony_rejects_non_youtube_link_but_keeps_count(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::SelectProvider)
        .paste("http://www.youtube.com/watch?v=insecure")
        .enter()
        .enter();
    let mut session = ctx.session(roster(&["Ann"]), exit(keys), FixedTitle::new("unused"));

    session.run().expect("run");

    let saved = ctx.saved();
    assert!(saved.tunes().is_empty());
    assert_eq!(saved.contributions("Ann"), Some(1));
}

#[rstest]
fn ceremony_with_empty_link_only_counts(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::SelectProvider).enter();
    let mut session = ctx.session(roster(&["Ann"]), exit(keys), FixedTitle::new("unused"));

    session.run().expect("run");

    let saved = ctx.saved();
    assert!(saved.tunes().is_empty());
    assert_eq!(saved.contributions("Ann"), Some(1));
}

#[rstest]
#[case(Document::new(), "No participants available. Add one first.")]
#[case(all_deactivated(), "All participants are deactivated.")]
fn ceremony_without_eligible_participants_changes_nothing(
    ctx: SessionTestCtx,
    #[case] doc: Document,
    #[case] message: &str,
) {
    // The script stops on the message screen so its text is still rendered.
    let keys = main_menu(ScriptedKeys::new(), MainAction::SelectProvider);
    let mut session = ctx.session(doc.clone(), keys, FixedTitle::failing());

    assert!(session.run().is_err());

    assert!(buffer_text(session.tui().backend().buffer()).contains(message));
    assert_eq!(session.document(), &doc);
}

#[rstest]
fn manual_add_accepts_any_link_without_touching_counts(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::AddTune)
        .text("https://example.com/mix")
        .enter()
        .enter();
    let mut session = ctx.session(roster(&["Ann"]), exit(keys), FixedTitle::new("unused"));

    session.run().expect("run");

    let saved = ctx.saved();
    assert_eq!(saved.contributions("Ann"), Some(0));
    let tune = &saved.tunes()[0];
    assert_eq!(tune.provider(), MANUAL_PROVIDER);
    assert_eq!(tune.id(), "");
    assert_eq!(tune.name(), "");
    assert_eq!(tune.link(), "https://example.com/mix");
}

#[rstest]
fn manual_add_looks_up_video_titles(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::AddTune)
        .paste("https://youtu.be/xyz789")
        .enter()
        .enter();
    let mut session = ctx.session(Document::new(), exit(keys), FixedTitle::new("Song"));

    session.run().expect("run");

    let saved = ctx.saved();
    let tune = &saved.tunes()[0];
    assert_eq!((tune.name(), tune.id()), ("Song", "xyz789"));
}

#[rstest]
fn removing_participant_cascades_to_their_tunes(ctx: SessionTestCtx) {
    let mut doc = roster(&["Ann", "Bo"]);
    for (provider, id) in [("Ann", "a1"), ("Bo", "b1"), ("Ann", "a2")] {
        let tune = Tune::new("", format!("https://youtu.be/{id}"), id, provider);
        apply_op(&mut doc, Op::AddTune { tune }).unwrap();
    }
    apply_op(&mut doc, Op::ToggleParticipant { name: "Ann".to_owned() }).unwrap();
    let keys = main_menu(ScriptedKeys::new(), MainAction::ManageParticipants)
        .down(1)
        .enter()
        .enter()
        .enter()
        .key(KeyCode::Esc);
    let mut session = ctx.session(doc, exit(keys), FixedTitle::failing());

    session.run().expect("run");

    let saved = ctx.saved();
    assert!(!saved.has_participant("Ann"));
    assert!(saved.disabled().is_empty());
    assert_eq!(saved.video_ids(), vec!["b1"]);
}

#[rstest]
fn toggling_participant_flips_activation(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::ManageParticipants)
        .down(3)
        .enter()
        .down(1)
        .enter()
        .enter()
        .key(KeyCode::Esc);
    let mut session = ctx.session(roster(&["Ann", "Bo"]), exit(keys), FixedTitle::failing());

    session.run().expect("run");

    let saved = ctx.saved();
    assert!(saved.is_active("Ann"));
    assert!(!saved.is_active("Bo"));
}

#[rstest]
fn participant_list_shows_counts_and_status(ctx: SessionTestCtx) {
    let mut doc = roster(&["Ann", "Bo"]);
    apply_op(&mut doc, Op::RecordContribution { name: "Ann".to_owned() }).unwrap();
    apply_op(&mut doc, Op::ToggleParticipant { name: "Bo".to_owned() }).unwrap();
    let keys = main_menu(ScriptedKeys::new(), MainAction::ManageParticipants)
        .down(2)
        .enter();
    let mut session = ctx.session(doc, keys, FixedTitle::failing());

    assert!(session.run().is_err());

    let screen = buffer_text(session.tui().backend().buffer());
    assert!(screen.contains("Ann  (tunes: 1, active)"), "{screen}");
    assert!(screen.contains("Bo  (tunes: 0, deactivated)"));
}

#[rstest]
fn empty_roster_submenu_actions_say_so(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::ManageParticipants)
        .down(1)
        .enter();
    let mut session = ctx.session(Document::new(), keys, FixedTitle::failing());

    assert!(session.run().is_err());

    assert!(buffer_text(session.tui().backend().buffer()).contains("No participants."));
}

#[rstest]
fn interrupt_in_submenu_propagates_and_saves(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::ManageParticipants).ctrl('c');
    let mut session = ctx.session(roster(&["Ann"]), keys, FixedTitle::failing());

    assert_eq!(session.run().expect("run"), SessionEnd::Interrupted);
    assert_eq!(ctx.saved(), roster(&["Ann"]));
}

#[rstest]
fn raised_signal_interrupts_and_saves(ctx: SessionTestCtx) {
    let (trigger, interrupt) = interrupt::channel();
    trigger.raise();
    let mut session =
        ctx.session_with(roster(&["Ann"]), ScriptedKeys::new(), FixedTitle::failing(), interrupt);

    assert_eq!(session.run().expect("run"), SessionEnd::Interrupted);
    assert_eq!(ctx.saved(), roster(&["Ann"]));
}

#[rstest]
fn tune_list_is_a_table_newest_first(ctx: SessionTestCtx) {
    let mut doc = roster(&["Ann"]);
    let tunes = [
        Tune::new("Old", "https://youtu.be/old1", "old1", "Ann")
            .with_added_at(Some(datetime!(2026-10-06 18:00 UTC))),
        Tune::new("New", "https://youtu.be/new1", "new1", "Ann")
            .with_added_at(Some(datetime!(2026-10-13 18:04 UTC))),
        Tune::new("", "https://example.com/mix", "", MANUAL_PROVIDER),
    ];
    for tune in tunes {
        apply_op(&mut doc, Op::AddTune { tune }).unwrap();
    }
    let keys = main_menu(ScriptedKeys::new(), MainAction::ListTunes);
    let mut session = ctx.session(doc, keys, FixedTitle::failing());

    assert!(session.run().is_err());

    let screen = buffer_text(session.tui().backend().buffer());
    assert!(screen.contains("Total tunes: 3"));
    assert!(screen.contains("Provided by"));
    let new = screen.find("2026-10-13 18:04").expect("new");
    let old = screen.find("2026-10-06 18:00").expect("old");
    let manual = screen.find("example.com/mix").expect("manual");
    assert!(new < old && old < manual);
}

#[rstest]
fn empty_lists_show_placeholder(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::PlaylistLink);
    let mut session = ctx.session(Document::new(), keys, FixedTitle::failing());

    assert!(session.run().is_err());

    assert!(buffer_text(session.tui().backend().buffer()).contains("No tunes yet."));
}

#[rstest]
fn playlist_view_joins_ids_and_lists_links(ctx: SessionTestCtx) {
    let mut doc = roster(&["Ann"]);
    for (link, id) in [("https://youtu.be/a1", "a1"), ("https://example.com/x", ""), ("https://youtu.be/b2", "b2")] {
        apply_op(&mut doc, Op::AddTune { tune: Tune::new("", link, id, "Ann") }).unwrap();
    }
    let keys = main_menu(ScriptedKeys::new(), MainAction::PlaylistLink);
    let mut session = ctx.session(doc, keys, FixedTitle::failing());

    assert!(session.run().is_err());

    let screen = buffer_text(session.tui().backend().buffer());
    assert!(screen.contains("https://www.youtube.com/watch_videos?video_ids=a1,b2"));
    assert!(screen.contains("https://example.com/x"));
    assert_eq!(
        session.take_playlist().as_deref(),
        Some(
            "https://www.youtube.com/watch_videos?video_ids=a1,b2\n\nLinks for pasting:\n\n\
             https://youtu.be/a1\nhttps://example.com/x\nhttps://youtu.be/b2"
        )
    );
    assert_eq!(session.take_playlist(), None);
}

/// Twenty dated tunes, `Song 01` (oldest) to `Song 20`, with ids `id01`..`id20`.
fn twenty_tunes() -> Document {
    let mut doc = roster(&["Ann"]);
    for day in 1..=20u8 {
        let id = format!("id{day:02}");
        let added_at = datetime!(2026-05-01 18:00 UTC)
            .replace_day(day)
            .expect("day");
        let tune = Tune::new(format!("Song {day:02}"), format!("https://youtu.be/{id}"), id, "Ann")
            .with_added_at(Some(added_at));
        apply_op(&mut doc, Op::AddTune { tune }).unwrap();
    }
    doc
}

#[rstest]
fn tune_list_scrolls_to_the_oldest_tune_on_a_small_terminal(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::ListTunes);
    let mut first_page = ctx.small_session(twenty_tunes(), keys.clone());
    assert!(first_page.run().is_err());
    let screen = buffer_text(first_page.tui().backend().buffer());
    assert!(screen.contains("Total tunes: 20  (rows 1-7 of 20)"), "{screen}");
    assert!(screen.contains("Song 20"));
    assert!(!screen.contains("Song 01"));
    assert!(screen.contains("Scroll:"));

    let mut session = ctx.small_session(twenty_tunes(), keys.key(KeyCode::End));
    assert!(session.run().is_err());
    let screen = buffer_text(session.tui().backend().buffer());
    assert!(screen.contains("(rows 14-20 of 20)"), "{screen}");
    assert!(screen.contains("Song 01"));
    assert!(screen.contains("2026-05-01 18:00"));
    assert!(!screen.contains("Song 20"));
}

#[rstest]
fn playlist_scrolls_to_the_last_link_on_a_small_terminal(ctx: SessionTestCtx) {
    let keys = main_menu(ScriptedKeys::new(), MainAction::PlaylistLink)
        .key(KeyCode::PageDown)
        .key(KeyCode::End);
    let mut session = ctx.small_session(twenty_tunes(), keys);

    assert!(session.run().is_err());

    let screen = buffer_text(session.tui().backend().buffer());
    assert!(screen.contains("https://youtu.be/id20"), "{screen}");
    assert!(screen.contains("printed again when Tunesday exits"));
    let ids = (1..=20).map(|day| format!("id{day:02}")).collect::<Vec<_>>().join(",");
    let playlist = session.take_playlist().expect("playlist");
    assert!(playlist.starts_with(&format!("https://www.youtube.com/watch_videos?video_ids={ids}\n")));
}

#[rstest]
fn save_failure_during_session_shows_notice_and_fails_exit(ctx: SessionTestCtx) {
    std::fs::create_dir(&ctx.path).unwrap();
    let keys = main_menu(ScriptedKeys::new(), MainAction::ManageParticipants)
        .enter()
        .text("Ann")
        .enter()
        .enter();
    let mut session = ctx.session(Document::new(), keys, FixedTitle::failing());

    let err = session.run().unwrap_err();

    // Script ran out on the submenu that follows the failed save.
    assert!(matches!(err, SessionError::Terminal(_)));
    let screen = buffer_text(session.tui().backend().buffer());
    assert!(screen.contains("Notice: Saving failed"), "{screen}");
    assert!(session.document().has_participant("Ann"));
}

#[rstest]
fn final_save_failure_on_exit_is_an_error(ctx: SessionTestCtx) {
    std::fs::create_dir(&ctx.path).unwrap();
    let mut session = ctx.session(Document::new(), exit(ScriptedKeys::new()), FixedTitle::failing());

    assert!(matches!(session.run(), Err(SessionError::Store(_))));
}

#[rstest]
fn final_save_failure_on_interrupt_is_swallowed(ctx: SessionTestCtx) {
    std::fs::create_dir(&ctx.path).unwrap();
    let mut session =
        ctx.session(Document::new(), ScriptedKeys::new().ctrl('c'), FixedTitle::failing());

    assert_eq!(session.run().expect("run"), SessionEnd::Interrupted);
}

#[test]
fn tune_row_formats_date_and_falls_back_to_link() {
    let dated = Tune::new("Song", "https://youtu.be/abc", "abc", "Ann")
        .with_added_at(Some(datetime!(2026-10-13 18:04:59 +02:00)));
    let undated = Tune::new("", "https://www.example.com/mix/", "", MANUAL_PROVIDER);

    assert_eq!(
        tune_row(1, &dated),
        vec!["1", "Song", "Ann", "2026-10-13 18:04", "youtu.be/abc"]
    );
    assert_eq!(
        tune_row(2, &undated),
        vec!["2", "example.com/mix", "manual", "-", "example.com/mix"]
    );
}

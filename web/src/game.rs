use crate::icons::{CircleIcon, ClockIcon, FlagIcon, XMarkIcon};
use crate::modal::ResultModal;
use crate::utils::*;
use chrono::prelude::*;
use gloo::timers::callback::Interval;
use sapper_core as game;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

/// What a cell looks like on screen. Extends the engine's cell state with the
/// end-of-game variants: on a loss every mine is uncovered, drawn as a plain
/// mine, the mine that was clicked, or an x-mark where a flag sat on a mine.
#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCell {
    Hidden,
    Revealed(u8),
    Flagged,
    Mine,
    TriggeredMine,
    FlaggedMine,
}

/// A running game plus its wall-clock bookkeeping. The engine knows nothing
/// about time; start and end stamps live here.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    game: game::Game,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    fn new(game: game::Game) -> Self {
        Self {
            game,
            started_at: None,
            ended_at: None,
        }
    }

    fn start(seed: u64, level: game::Level) -> Self {
        use game::GridGenerator;
        let grid = game::RandomGridGenerator::new(seed).generate(level.board_spec());
        Self::new(game::Game::new(grid))
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    fn won(&self) -> bool {
        matches!(self.game.state(), game::GameState::Won)
    }

    fn reveal(&mut self, pos: game::Pos, now: DateTime<Utc>) -> bool {
        let updated = self.game.reveal(pos).is_ok_and(|o| o.has_update());
        if updated {
            // the clock starts on the first opened cell, not on flags
            if self.started_at.is_none() {
                self.started_at = Some(now);
            }
            self.note_end(now);
        }
        updated
    }

    fn toggle_flag(&mut self, pos: game::Pos, now: DateTime<Utc>) -> bool {
        let updated = self.game.toggle_flag(pos).is_ok_and(|o| o.has_update());
        if updated {
            self.note_end(now);
        }
        updated
    }

    fn note_end(&mut self, now: DateTime<Utc>) {
        if self.game.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    fn view_cell(&self, pos: game::Pos) -> ViewCell {
        use game::CellState::*;

        let cell = self.game.cell_at(pos);

        if matches!(self.game.state(), game::GameState::Lost) && self.game.has_mine_at(pos) {
            if self.game.triggered_mine() == Some(pos) {
                return ViewCell::TriggeredMine;
            }
            return match cell {
                Flagged => ViewCell::FlaggedMine,
                _ => ViewCell::Mine,
            };
        }

        match cell {
            Hidden => ViewCell::Hidden,
            Revealed(count) => ViewCell::Revealed(count),
            Flagged => ViewCell::Flagged,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Reveal(game::Pos),
    Flag(game::Pos),
    UpdateTime,
    NewGame,
    SetLevel(game::Level),
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random, from the location hash.
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: game::Coord,
    y: game::Coord,
    cell: ViewCell,
    locked: bool,
    on_reveal: Callback<game::Pos>,
    on_flag: Callback<game::Pos>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCell::*;

    let CellProps {
        x,
        y,
        cell,
        locked,
        on_reveal,
        on_flag,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell {
            Hidden => classes!(),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Flagged => classes!("flag"),
            Mine => classes!("open", "mine"),
            TriggeredMine => classes!("open", "mine", "oops"),
            FlaggedMine => classes!("flag", "wrong"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) click", x, y);
        on_reveal.emit((x, y));
    });

    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        log::trace!("({}, {}) context menu", x, y);
        on_flag.emit((x, y));
    });

    let content = match cell {
        Revealed(count) if count > 0 => html! { {count} },
        Flagged => html! { <FlagIcon/> },
        Mine | TriggeredMine => html! { <CircleIcon/> },
        FlaggedMine => html! { <XMarkIcon/> },
        Hidden | Revealed(_) => html! {},
    };

    html! {
        <td {class} {onclick} {oncontextmenu}>{content}</td>
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    level: game::Level,
    session: GameSession,
    prev_time: u32,
    forced_seed: Option<u64>,
    _timer_interval: Interval,
}

impl GameView {
    fn fresh_session(&self) -> GameSession {
        let seed = self.forced_seed.unwrap_or_else(js_random_seed);
        log::debug!("new game: level {:?}, seed {}", self.level, seed);
        GameSession::start(seed, self.level)
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn get_time(&self) -> u32 {
        self.session.elapsed_secs(utc_now())
    }

    fn get_mines_left(&self) -> u32 {
        self.session.game.mines_left().into()
    }

    fn game_state_class(&self) -> &'static str {
        use game::GameState::*;
        match self.session.game.state() {
            Ready => "not-started",
            Running => "in-progress",
            Won => "win",
            Lost => "lose",
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let forced_seed = ctx.props().seed;
        let level = game::Level::default();
        let seed = forced_seed.unwrap_or_else(js_random_seed);
        Self {
            level,
            session: GameSession::start(seed, level),
            prev_time: 0,
            forced_seed,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Reveal(pos) => self.session.reveal(pos, utc_now()),
            Flag(pos) => self.session.toggle_flag(pos, utc_now()),
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.session = self.fresh_session();
                self.prev_time = 0;
                true
            }
            SetLevel(level) => {
                if self.level != level {
                    self.level = level;
                    self.session = self.fresh_session();
                    self.prev_time = 0;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (cols, rows) = self.session.game.size();
        let mines_left = format_for_counter(self.get_mines_left());
        let elapsed_time = format_for_counter(self.get_time());
        let finished = self.session.is_finished();

        let on_reveal = ctx.link().callback(Reveal);
        let on_flag = ctx.link().callback(Flag);
        let cb_play_again = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_level = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_dyn_into()?;
            game::Level::from_name(&select.value()).map(SetLevel)
        });

        html! {
            <div class={classes!("sapper", self.game_state_class())}
                 oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <h1 class="title">{"Minesweeper"}</h1>
                <div class="info">
                    <div class="select">
                        <select name="level" onchange={cb_level}>
                            {
                                for game::Level::ALL.into_iter().map(|level| html! {
                                    <option value={level.name()} selected={level == self.level}>
                                        {level.label()}
                                    </option>
                                })
                            }
                        </select>
                    </div>
                    <div class="info-wrap">
                        <span class="icon-slot"><FlagIcon/></span>
                        <span class="number">{mines_left}</span>
                    </div>
                    <div class="info-wrap">
                        <span class="icon-slot"><ClockIcon/></span>
                        <span class="number">{elapsed_time}</span>
                    </div>
                </div>
                <table class={classes!("board", self.level.name())}>
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                {
                                    for (0..cols).map(|x| {
                                        let pos = (x, y);
                                        let cell = self.session.view_cell(pos);
                                        html! {
                                            <CellView {x} {y} {cell} locked={finished}
                                                on_reveal={on_reveal.clone()}
                                                on_flag={on_flag.clone()}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if finished {
                    <ResultModal
                        won={self.session.won()}
                        mines_flagged={u32::from(self.session.game.mines_flagged())}
                        mines_missed={u32::from(self.session.game.total_mines() - self.session.game.mines_flagged())}
                        play_secs={self.session.elapsed_secs(utc_now())}
                        on_play_again={cb_play_again}/>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn session(size: game::Pos, mines: &[game::Pos]) -> GameSession {
        let grid = game::MineGrid::from_mine_positions(size, mines).unwrap();
        GameSession::new(game::Game::new(grid))
    }

    #[test]
    fn clock_starts_on_first_reveal_not_on_flags() {
        let mut session = session((3, 3), &[(2, 2), (0, 2)]);

        assert!(session.toggle_flag((0, 0), t(5)));
        assert_eq!(session.elapsed_secs(t(10)), 0);

        assert!(session.toggle_flag((0, 0), t(6)));
        assert!(session.reveal((0, 0), t(10)));
        assert_eq!(session.elapsed_secs(t(25)), 15);
    }

    #[test]
    fn clock_freezes_when_the_game_ends() {
        let mut session = session((2, 2), &[(0, 0)]);

        assert!(session.reveal((1, 1), t(0)));
        assert!(session.reveal((0, 0), t(30)));

        assert!(session.is_finished());
        assert_eq!(session.elapsed_secs(t(100)), 30);
    }

    #[test]
    fn loss_uncovers_mines_and_marks_the_triggered_one() {
        let mut session = session((2, 2), &[(0, 0), (0, 1)]);

        assert!(session.reveal((1, 1), t(0)));
        assert!(session.toggle_flag((0, 1), t(1)));
        assert!(session.reveal((0, 0), t(2)));

        assert_eq!(session.view_cell((0, 0)), ViewCell::TriggeredMine);
        assert_eq!(session.view_cell((0, 1)), ViewCell::FlaggedMine);
        assert_eq!(session.view_cell((1, 1)), ViewCell::Revealed(2));
    }

    #[test]
    fn unflagged_mines_show_as_plain_mines_on_loss() {
        let mut session = session((3, 1), &[(0, 0), (2, 0)]);

        assert!(session.reveal((0, 0), t(0)));
        assert_eq!(session.view_cell((0, 0)), ViewCell::TriggeredMine);
        assert_eq!(session.view_cell((2, 0)), ViewCell::Mine);
        assert_eq!(session.view_cell((1, 0)), ViewCell::Hidden);
    }

    #[test]
    fn win_by_flagging_reports_all_mines_flagged() {
        let mut session = session((2, 1), &[(0, 0)]);

        assert!(session.toggle_flag((0, 0), t(3)));
        assert!(session.is_finished());
        assert!(session.won());
        assert_eq!(session.game.mines_flagged(), 1);
        assert_eq!(session.view_cell((0, 0)), ViewCell::Flagged);
    }

    #[test]
    fn moves_after_the_end_are_ignored() {
        let mut session = session((2, 1), &[(0, 0)]);

        assert!(session.reveal((0, 0), t(0)));
        assert!(!session.reveal((1, 0), t(1)));
        assert!(!session.toggle_flag((1, 0), t(1)));
    }
}

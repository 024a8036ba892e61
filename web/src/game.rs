use crate::dictionary;
use crate::settings::GameProps;
use crate::utils::*;
use bitflags::bitflags;
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use lexigrid_core as game;
use game::{Effect, Event, Severity};
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const TICK_MS: u32 = 1000;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Down(game::Coord2),
    Enter(game::Coord2),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Game(Event),
    CellEvent(CellMsg),
    CloseSummary,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct RoundSummary {
    final_score: u32,
    rank: Option<usize>,
}

const fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "green",
        Severity::Failure => "red",
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: game::Coord,
    y: game::Coord,
    letter: char,
    #[prop_or_default]
    selected: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        x,
        y,
        letter,
        selected,
        callback,
    } = props.clone();

    let class = classes!("grid-item", selected.then_some("selected"));

    let onmousedown = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            // the grid container would otherwise report a press on empty space
            e.stop_propagation();
            e.prevent_default();
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            log::trace!("({}, {}) mouse down ({:?})", x, y, buttons);
            if buttons.contains(MouseButtons::LEFT) {
                callback.emit(CellMsg::Down((x, y)));
            }
        })
    };

    let onmouseenter = Callback::from(move |e: MouseEvent| {
        let buttons = MouseButtons::from_bits_truncate(e.buttons());
        log::trace!("({}, {}) mouse enter ({:?})", x, y, buttons);
        callback.emit(CellMsg::Enter((x, y)));
    });

    html! {
        <td {class} {onmousedown} {onmouseenter}>{letter}</td>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct LeaderboardProps {
    scores: Vec<u32>,
}

#[function_component(LeaderboardView)]
fn leaderboard_component(props: &LeaderboardProps) -> Html {
    if props.scores.is_empty() {
        return html! {};
    }

    html! {
        <section id="leaderboard">
            <h2>{"Leaderboard"}</h2>
            {
                for props.scores.iter().enumerate().map(|(index, score)| html! {
                    <p>{format!("{}. Score: {}", index + 1, score)}</p>
                })
            }
        </section>
    }
}

pub(crate) struct GameView {
    controller: game::GameController,
    dictionary_url: String,
    summary: Option<RoundSummary>,
    ticker: Option<Interval>,
    debounce: Option<Timeout>,
    _pointer_up_listener: EventListener,
}

impl GameView {
    fn create_pointer_up_listener(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&gloo::utils::document(), "mouseup", move |_| {
            link.send_message(Msg::Game(Event::PointerUp))
        })
    }

    fn create_ticker(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MS, move || link.send_message(Msg::Game(Event::TimerTick)))
    }

    fn create_debounce(ctx: &Context<Self>, ticket: game::Ticket, delay_ms: u32) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(delay_ms, move || {
            link.send_message(Msg::Game(Event::DebounceElapsed(ticket)))
        })
    }

    fn spawn_lookup(&self, ctx: &Context<Self>, ticket: game::Ticket, word: String) {
        let link = ctx.link().clone();
        let base_url = self.dictionary_url.clone();
        spawn_local(async move {
            let valid = dictionary::is_valid_word(&base_url, &word).await;
            link.send_message(Msg::Game(Event::ValidationResult {
                ticket,
                word,
                valid,
            }));
        });
    }

    fn apply(&mut self, ctx: &Context<Self>, effects: game::Effects) {
        for effect in effects {
            log::trace!("effect: {:?}", effect);
            match effect {
                // rendered straight from the controller state
                Effect::GridChanged | Effect::TimeChanged(_) | Effect::ScoreChanged(_) => {}
                Effect::StartTicker => {
                    self.summary = None;
                    self.ticker = Some(Self::create_ticker(ctx));
                }
                Effect::StopTicker => {
                    self.ticker = None;
                }
                Effect::ScheduleValidation { ticket, delay_ms } => {
                    self.debounce = Some(Self::create_debounce(ctx, ticket, delay_ms));
                }
                Effect::LookupWord { ticket, word } => self.spawn_lookup(ctx, ticket, word),
                Effect::ShowMessage(message) => log::debug!("message: {}", message.text),
                Effect::RoundEnded { final_score, rank } => {
                    self.summary = Some(RoundSummary { final_score, rank });
                }
                Effect::LeaderboardChanged(leaderboard) => leaderboard.local_save(),
            }
        }
    }

    fn view_grid(&self, ctx: &Context<Self>) -> Html {
        let grid = self.controller.grid();
        let (cols, rows) = grid.size();
        let cb_empty_down = ctx.link().batch_callback(|e: MouseEvent| {
            MouseButtons::from_bits_truncate(e.buttons())
                .contains(MouseButtons::LEFT)
                .then_some(Msg::Game(Event::PointerDown(None)))
        });

        html! {
            <div class="grid-container" onmousedown={cb_empty_down}>
                <table>
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                {
                                    for (0..cols).map(|x| {
                                        let cell = grid.cell_at((x, y)).unwrap_or_default();
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {x} {y} letter={cell.letter} selected={cell.selected} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }

    fn view_summary(&self, ctx: &Context<Self>) -> Html {
        let Some(RoundSummary { final_score, rank }) = self.summary else {
            return html! {};
        };
        let cb_close = ctx.link().callback(|_| Msg::CloseSummary);

        html! {
            <Modal>
                <dialog id="summary" open={true}>
                    <article>
                        <p>{format!("Time's up! Your final score is: {}", final_score)}</p>
                        {
                            match rank {
                                Some(rank) => html! { <p>{format!("That's #{} on the leaderboard.", rank)}</p> },
                                None => html! {},
                            }
                        }
                        <footer>
                            <button onclick={cb_close}>{"OK"}</button>
                        </footer>
                    </article>
                </dialog>
            </Modal>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = props.game_config();
        let leaderboard = load_leaderboard(config.leaderboard_size);
        log::debug!("loaded leaderboard: {:?}", leaderboard.scores());

        Self {
            controller: game::GameController::new(config, props.seed(), leaderboard),
            dictionary_url: props.dictionary_url.clone(),
            summary: None,
            ticker: None,
            debounce: None,
            _pointer_up_listener: Self::create_pointer_up_listener(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let event = match msg {
            Game(event) => event,
            CellEvent(CellMsg::Down(pos)) => Event::PointerDown(Some(pos)),
            CellEvent(CellMsg::Enter(pos)) => Event::PointerEnter(pos),
            CloseSummary => return self.summary.take().is_some(),
        };

        // keep re-renders to what can change on screen
        let redraw = !matches!(event, Event::PointerUp | Event::PointerEnter(_))
            || self.controller.state().tracker.is_selecting();
        let effects = self.controller.handle(event);
        let redraw = redraw || !effects.is_empty();
        self.apply(ctx, effects);
        redraw
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let is_active = self.controller.is_round_active();
        let (message, color) = self
            .controller
            .last_message()
            .map_or(("", "inherit"), |message| {
                (message.text.as_str(), severity_color(message.severity))
            });

        let cb_new_letters = ctx.link().callback(|_| Game(Event::Reshuffle));
        let cb_stop = ctx.link().callback(|_| Game(Event::StopRound));

        html! {
            <div class="lexigrid">
                <nav>
                    <aside id="score">{format!("Score: {}", self.controller.score())}</aside>
                    <aside id="timer">{format!("Time Left: {}s", self.controller.time_left())}</aside>
                </nav>
                <p id="message" style={format!("color: {}", color)}>{message}</p>
                { self.view_grid(ctx) }
                <footer>
                    <button onclick={cb_new_letters} disabled={is_active}>{"New letters"}</button>
                    <button onclick={cb_stop} disabled={!is_active}>{"End round"}</button>
                </footer>
                <LeaderboardView scores={self.controller.leaderboard().scores().to_vec()}/>
                { self.view_summary(ctx) }
            </div>
        }
    }
}

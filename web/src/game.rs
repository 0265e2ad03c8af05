use clap::Args;
use std::rc::Rc;
use trivia_core::{self as trivia, Board, BoardConfig, CellCoord, RevealState, TriviaError};
use yew::prelude::*;

use crate::api::HttpSource;
use crate::utils::js_random_seed;

/// Text shown in a cell before its clue is revealed.
const PLACEHOLDER: &str = "?";

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    Question,
    Answer,
}

impl ViewCellState {
    /// CSS class marking the cell, if any.
    const fn marker(self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Question => Some("question"),
            Self::Answer => Some("answer"),
        }
    }
}

impl From<RevealState> for ViewCellState {
    fn from(state: RevealState) -> Self {
        match state {
            RevealState::Hidden => Self::Hidden,
            RevealState::Question => Self::Question,
            RevealState::Answer => Self::Answer,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Loading,
    Ready(Board),
    Failed(TriviaError),
}

/// Board state of the current round plus the generation guarding it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Session {
    phase: Phase,
    generation: u64,
}

impl Session {
    fn new() -> Self {
        Self {
            phase: Phase::Loading,
            generation: 0,
        }
    }

    /// Drops the current board and returns the generation of the new round.
    fn restart(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Loading;
        self.generation
    }

    /// Stores a finished load, unless a newer round was started meanwhile.
    fn finish(&mut self, generation: u64, result: trivia::Result<Board>) -> bool {
        if generation != self.generation {
            log::debug!(
                "dropping round {} result, round {} is current",
                generation,
                self.generation
            );
            return false;
        }

        self.phase = match result {
            Ok(board) => Phase::Ready(board),
            Err(err) => {
                log::error!("round {} failed: {}", generation, err);
                Phase::Failed(err)
            }
        };
        true
    }

    fn reveal(&mut self, coord: CellCoord) -> bool {
        let Phase::Ready(board) = &mut self.phase else {
            return false;
        };

        match board.reveal(coord) {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::warn!("reveal {}: {}", coord, err);
                false
            }
        }
    }

    fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// The spinner is up exactly while a round is loading.
    fn shows_spinner(&self) -> bool {
        self.is_loading()
    }

    /// The restart control is hidden while a round is loading.
    fn restart_class(&self) -> Classes {
        classes!("restart", self.is_loading().then_some("hidden"))
    }

    fn alert_text(&self) -> Option<String> {
        self.error().map(|err| err.to_string())
    }

    fn shows_cleared_note(&self) -> bool {
        self.board().is_some_and(Board::is_fully_answered)
    }

    fn board(&self) -> Option<&Board> {
        match &self.phase {
            Phase::Ready(board) => Some(board),
            _ => None,
        }
    }

    fn error(&self) -> Option<&TriviaError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn cell_at(&self, coord: CellCoord) -> Option<(ViewCellState, &str)> {
        let clue = self.board()?.clue_at(coord).ok()?;
        let text = clue.visible_text().unwrap_or(PLACEHOLDER);
        Some((clue.reveal_state().into(), text))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Restart,
    Loaded {
        generation: u64,
        result: trivia::Result<Board>,
    },
    Reveal(CellCoord),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    coord: CellCoord,
    cell_state: ViewCellState,
    text: AttrValue,
    callback: Callback<CellCoord>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        coord,
        cell_state,
        text,
        callback,
    } = props.clone();

    let class = classes!("clue", cell_state.marker());
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}) click", coord);
        callback.emit(coord);
    });

    html! {
        <td id={coord.to_string()} {class} {onclick}>{text}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Base URL of the trivia service
    #[arg(long, default_value = trivia_protocol::DEFAULT_API_BASE)]
    pub api_base: String,

    /// Attempts per round and rounds per load before giving up
    #[arg(long, default_value_t = BoardConfig::MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Largest random offset into a category's clue list
    #[arg(long, default_value_t = 0)]
    pub clue_offset_max: u32,

    /// Force a seed for the request offsets instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub(crate) struct BoardView {
    session: Session,
    source: Rc<HttpSource>,
    config: BoardConfig,
    seed: Option<u64>,
}

impl BoardView {
    fn start_round(&mut self, ctx: &Context<Self>) {
        let generation = self.session.restart();
        let seed = self
            .seed
            .map_or_else(js_random_seed, |seed| seed.wrapping_add(generation));
        log::debug!("starting round {} with seed {}", generation, seed);

        let source = Rc::clone(&self.source);
        let config = self.config;
        ctx.link().send_future(async move {
            let result = trivia::load_board(&*source, &config, seed).await;
            Msg::Loaded { generation, result }
        });
    }

    fn board_html(&self, ctx: &Context<Self>, board: &Board) -> Html {
        let callback = ctx.link().callback(Msg::Reveal);

        html! {
            <table id="jeopardy">
                <thead>
                    <tr>
                        { for board.categories().iter().map(|category| html! {
                            <th>{category.title.clone()}</th>
                        }) }
                    </tr>
                </thead>
                <tbody>
                    {
                        for board.rows().map(|row| html! {
                            <tr>
                                {
                                    for row.filter_map(|coord| {
                                        let (cell_state, text) = self.session.cell_at(coord)?;
                                        let callback = callback.clone();
                                        let text = AttrValue::from(text.to_string());
                                        Some(html! {
                                            <CellView {coord} {cell_state} {text} {callback}/>
                                        })
                                    })
                                }
                            </tr>
                        })
                    }
                </tbody>
            </table>
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut view = Self {
            session: Session::new(),
            source: Rc::new(HttpSource::new(props.api_base.clone())),
            config: BoardConfig::new(
                BoardConfig::CATEGORIES,
                BoardConfig::CLUES_PER_CATEGORY,
                props.max_attempts,
            )
            .with_offsets(BoardConfig::CATEGORY_OFFSET_MAX, props.clue_offset_max),
            seed: props.seed,
        };
        view.start_round(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Restart => {
                self.start_round(ctx);
                true
            }
            Loaded { generation, result } => self.session.finish(generation, result),
            Reveal(coord) => {
                log::debug!("reveal cell: {}", coord);
                self.session.reveal(coord)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Restart
        });

        html! {
            <div class="trivia">
                <nav>
                    <button class={self.session.restart_class()} onclick={cb_restart}>
                        {"Restart"}
                    </button>
                </nav>
                <div class="spinner">
                    if self.session.shows_spinner() {
                        <div class="spinner-border" role="status">
                            <span class="sr-only">{"Loading..."}</span>
                        </div>
                    }
                </div>
                if let Some(text) = self.session.alert_text() {
                    <p class="error" role="alert">{text}</p>
                }
                if let Some(board) = self.session.board() {
                    { self.board_html(ctx, board) }
                    if self.session.shows_cleared_note() {
                        <p class="done">{"Board cleared!"}</p>
                    }
                }
            </div>
        }
    }
}

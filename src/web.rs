//! Browser wiring: canvas and page elements, the `setInterval` timer, the play
//! button. The game lives in a thread-local slot; the interval callback and the
//! click listener both borrow it for the duration of one call.

use std::cell::RefCell;

use log::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window, window};

use crate::board::Board;
use crate::config::GameConfig;
use crate::dice::EntropyDie;
use crate::error::GameError;
use crate::game::{Game, GameDisplay, Scheduler};

type WebGame = Game<Board<CanvasRenderingContext2d>, DomDisplay, IntervalScheduler>;

thread_local! {
    static GAME: RefCell<Option<WebGame>> = RefCell::new(None);
}

/// Die value and status line, written as element text.
pub struct DomDisplay {
    dice: Element,
    info: Element,
}

impl GameDisplay for DomDisplay {
    fn show_die(&mut self, value: Option<u8>) {
        let text = value.map(|v| v.to_string());
        self.dice.set_text_content(text.as_deref());
    }

    fn show_info(&mut self, text: &str) {
        self.info.set_text_content(Some(text));
    }
}

/// `setInterval` driven scheduler. The callback is created once and outlives
/// every interval it is registered with, so clearing an interval from inside
/// the callback never drops the running closure.
pub struct IntervalScheduler {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl Scheduler for IntervalScheduler {
    type Handle = i32;

    fn start(&mut self, interval_ms: u32) -> Result<i32, GameError> {
        let timeout = i32::try_from(interval_ms)
            .map_err(|_| GameError::Scheduler(format!("interval {interval_ms}ms too long")))?;
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|e| GameError::Scheduler(format!("{e:?}")))
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_interval_with_handle(handle);
    }
}

fn on_tick() {
    GAME.with(|cell| {
        if let Some(game) = cell.borrow_mut().as_mut() {
            if let Err(err) = game.tick(&mut EntropyDie) {
                error!("tick failed: {err}");
                game.halt();
            }
        }
    });
}

fn on_play() {
    GAME.with(|cell| {
        if let Some(game) = cell.borrow_mut().as_mut() {
            if let Err(err) = game.play() {
                error!("could not start game: {err}");
            }
        }
    });
}

/// Build the board and game on the page described by `config` and hook up the
/// play button. Calling it again once a game exists does nothing.
pub fn start(config: GameConfig) -> Result<(), JsValue> {
    config.validate()?;
    if GAME.with(|cell| cell.borrow().is_some()) {
        warn!("start ignored: a game is already on the page");
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse canvas
    let canvas: HtmlCanvasElement = match doc.get_element_by_id(&config.canvas_id) {
        Some(el) => el.dyn_into()?,
        None => {
            let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
            c.set_id(&config.canvas_id);
            append_to_body(&doc, &c)?;
            c
        }
    };
    let side = config.board_size_px.round() as u32;
    canvas.set_width(side);
    canvas.set_height(side);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into()?;

    let board = Board::new(ctx, config.board_size_px, config.chip_size_px)?;
    let display = DomDisplay {
        dice: element_or_create(&doc, &config.dice_id, "div", None)?,
        info: element_or_create(&doc, &config.info_id, "div", None)?,
    };
    let scheduler = IntervalScheduler {
        window: win,
        callback: Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>),
    };
    let game = Game::new(board, display, scheduler, config.interval_ms);
    GAME.with(|cell| cell.replace(Some(game)));

    // Play button
    {
        let play = element_or_create(&doc, &config.play_id, "button", Some("Play"))?;
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            on_play();
        }) as Box<dyn FnMut(_)>);
        play.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    info!(
        "board ready: {}px, rolling every {}ms once play is pressed",
        config.board_size_px, config.interval_ms
    );
    Ok(())
}

fn append_to_body(doc: &Document, el: &Element) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(el)?;
    Ok(())
}

fn element_or_create(
    doc: &Document,
    id: &str,
    tag: &str,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    el.set_text_content(text);
    append_to_body(doc, &el)?;
    Ok(el)
}

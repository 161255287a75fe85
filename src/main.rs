//! Dino Jump entry point
//!
//! The web build drives the screen from `requestAnimationFrame` and draws it
//! with WebGPU. The native build plays one idle-mode run headless and writes
//! its score to the file store.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dino_jump::consts::SIM_DT;
    use dino_jump::platform::{default_storage, init_logging};
    use dino_jump::renderer::{RenderState, shapes};
    use dino_jump::{Screen, ScreenView, Settings, SyncStatus, Tuning};

    /// Page state shared between the event closures
    struct App {
        screen: Screen,
        render_state: Option<RenderState>,
        document: Document,
        last_time: f64,
        /// Lines currently shown in `#records-list`
        shown_records: Vec<String>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(screen: Screen, document: Document) -> Self {
            Self {
                screen,
                render_state: None,
                document,
                last_time: 0.0,
                shown_records: Vec::new(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn track_fps(&mut self, time: f64) {
            let oldest = self.frame_times[self.frame_index];
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();
            if oldest > 0.0 {
                let elapsed = (time - oldest) / 1000.0;
                if elapsed > 0.0 {
                    self.fps = (self.frame_times.len() as f64 / elapsed).round() as u32;
                }
            }
        }

        fn render(&mut self, view: &ScreenView) {
            let Some(rs) = &mut self.render_state else {
                return;
            };
            match rs.render(&shapes::scene(view)) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = rs.size;
                    rs.resize(w, h);
                }
                Err(e) => log::error!("Render error: {:?}", e),
            }
        }

        fn update_dom(&mut self, view: &ScreenView) {
            if let Some(btn) = self.document.get_element_by_id("toggle-btn") {
                btn.set_text_content(Some(view.toggle_label));
            }
            if let Some(el) = self.document.get_element_by_id("records-title") {
                el.set_text_content(Some(view.records_title));
            }
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&view.score.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("sync-status") {
                let text = match view.sync {
                    SyncStatus::Loading => "Cargando...",
                    SyncStatus::Pending => "Guardando...",
                    SyncStatus::Synced => "",
                    SyncStatus::Unsynced => "Sin guardar",
                };
                el.set_text_content(Some(text));
            }
            if self.screen.settings().show_fps {
                if let Some(el) = self.document.get_element_by_id("fps") {
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                }
            }

            if view.record_lines != self.shown_records {
                self.rebuild_records(&view.record_lines);
                self.shown_records = view.record_lines.clone();
            }
        }

        fn rebuild_records(&self, lines: &[String]) {
            let Some(list) = self.document.get_element_by_id("records-list") else {
                return;
            };
            list.set_text_content(None);
            for line in lines {
                if let Ok(item) = self.document.create_element("li") {
                    item.set_text_content(Some(line));
                    let _ = list.append_child(&item);
                }
            }
        }
    }

    pub async fn run() {
        init_logging();
        log::info!("Dino Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let store = default_storage();
        let settings = Settings::load(store.as_ref());
        let tuning = Tuning::load(store.as_ref());
        log::info!("Playing as {}", settings.user);
        let mut screen = Screen::new(settings, tuning, store);
        screen.mount();

        let app = Rc::new(RefCell::new(App::new(screen, document.clone())));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(rs) => app.borrow_mut().render_state = Some(rs),
            // Keep the page usable; the records list still works
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        setup_toggle_button(&document, app.clone());
        setup_jump_input(&document, &canvas, app.clone());
        setup_auto_pause(&document, app.clone());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(app);
        log::info!("Dino Jump ready");
    }

    fn setup_toggle_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("toggle-btn") else {
            log::warn!("No #toggle-btn on the page");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().screen.toggle();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_jump_input(document: &Document, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Space bar
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    if !event.repeat() {
                        app.borrow_mut().screen.jump();
                    }
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the canvas
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().screen.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Stops the synthetic mousedown from jumping twice
                event.prevent_default();
                app.borrow_mut().screen.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the game when the page loses focus or is hidden
    fn setup_auto_pause(document: &Document, app: Rc<RefCell<App>>) {
        fn pause(app: &Rc<RefCell<App>>, reason: &str) {
            let mut a = app.borrow_mut();
            if a.screen.is_running() {
                a.screen.toggle();
                log::info!("Auto-paused ({})", reason);
            }
        }

        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    pause(&app, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                pause(&app, "window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;
            a.track_fps(time);

            a.screen.frame(dt);

            let view = a.screen.view();
            a.render(&view);
            a.update_dom(&view);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use dino_jump::consts::{MAX_FRAME_DT, SIM_DT};
    use dino_jump::host::GameLoop;
    use dino_jump::platform::{FileStore, seed_from_clock};
    use dino_jump::sim::{Session, TickInput};
    use dino_jump::{ScoreBoard, Settings, Storage, SyncStatus, Tuning};

    /// Give up on a run that outlasts this much simulated time (seconds)
    const MAX_RUN_SECONDS: f32 = 600.0;

    /// Plays one idle-mode run headless and adds its score to the leaderboard
    #[derive(Parser, Debug, PartialEq)]
    #[command(name = "dino-jump", version)]
    pub struct Args {
        /// Name recorded with the score (saved for later runs)
        #[arg(long, value_name = "NAME")]
        pub user: Option<String>,

        /// Directory holding records, settings and tuning
        #[arg(long, value_name = "DIR", default_value = "dino-jump-data")]
        pub data_dir: PathBuf,
    }

    /// Play one idle-mode run and record it. Returns the final sync status.
    pub fn run(args: Args) -> SyncStatus {
        let store = FileStore::new(args.data_dir);
        log::info!("Storing data in {}", store.dir().display());

        let mut settings = Settings::load(&store);
        let tuning = Tuning::load(&store);
        let mut store: Box<dyn Storage> = Box::new(store);
        if let Some(user) = args.user.as_deref() {
            settings = settings.with_user(user);
            settings.save(store.as_mut());
        }

        let mut board = ScoreBoard::new(store);
        board.load_initial();
        board.settle();

        let seed = seed_from_clock();
        log::info!("Idle run for {} (seed {})", settings.user, seed);
        let mut session = Session::new(tuning).with_idle_player(seed);
        let mut game_loop = GameLoop::new();
        let mut input = TickInput::default();

        let mut elapsed = 0.0;
        while !session.run.is_over() && elapsed < MAX_RUN_SECONDS {
            let report = game_loop.frame(true, MAX_FRAME_DT, &mut session, &mut input);
            elapsed += report.ticks as f32 * SIM_DT;
        }
        if !session.run.is_over() {
            log::warn!("Stopping idle run after {:.0}s", elapsed);
        }

        let score = session.run.score;
        let rank = board.append(&settings.user, score);
        board.settle();
        log::info!(
            "Run finished: {} points, {} obstacles, rank #{}",
            score,
            session.run.obstacles_cleared,
            rank
        );

        log::info!("Records:");
        for record in board.records() {
            log::info!("  {}", record.display_line());
        }
        board.status()
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    dino_jump::platform::init_logging();
    log::info!("Dino Jump (native, headless) starting...");

    // Bad arguments exit with status 2, --help/--version with 0
    let args = headless::Args::parse();

    if headless::run(args) == dino_jump::SyncStatus::Unsynced {
        log::error!("Records could not be saved");
        std::process::exit(1);
    }
}

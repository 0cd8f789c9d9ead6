#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use metatron::app;
use metatron::app::backend::NativeBackend;
use metatron::app::background;
use metatron::app::file_dialog::NativeDialogService;
use metatron::config::{self, AppConfig};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use tracing_subscriber::EnvFilter;
use wry::WebViewBuilder;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let initial_config = AppConfig::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    let (width, height) = initial_config.window_size;
    let (pos_x, pos_y) = initial_config.window_position;
    let animated_background = initial_config.animated_background;

    // Create the event loop and window
    let event_loop = EventLoopBuilder::<app::events::UserEvent>::with_user_event().build();

    let window = WindowBuilder::new()
        .with_title("Metatron")
        .with_inner_size(tao::dpi::LogicalSize::new(width, height))
        .with_position(tao::dpi::LogicalPosition::new(pos_x, pos_y))
        .with_min_inner_size(tao::dpi::LogicalSize::new(720, 520))
        .build(&event_loop)
        .expect("Failed to build Window");

    let window = Arc::new(window);

    // Create the shared application state and the event loop proxy
    let proxy = event_loop.create_proxy();
    let state = Arc::new(Mutex::new(app::state::AppState::new(initial_config)));
    let dialog_service: Arc<dyn app::file_dialog::DialogService> = Arc::new(NativeDialogService);
    let backend: Arc<dyn app::backend::Backend> = Arc::new(NativeBackend::default());

    let ipc_handler_state = state.clone();
    let ipc_handler_proxy = proxy.clone();
    let ipc_handler = move |message: String| {
        app::handle_ipc_message(
            message,
            dialog_service.clone(),
            backend.clone(),
            ipc_handler_proxy.clone(),
            ipc_handler_state.clone(),
        );
    };

    let webview = WebViewBuilder::new(&*window)
        .with_html(include_str!("ui/index.html"))
        .with_devtools(cfg!(debug_assertions))
        .with_ipc_handler(ipc_handler)
        .build()
        .expect("Failed to build WebView");

    let mut particle_background = background::new_desktop_background(window.clone());
    if animated_background {
        background::apply_preference(&mut particle_background, true, &webview);
    }

    let state_for_events = state.clone();
    let window_for_events = window.clone();

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::NewEvents(StartCause::Init) => {
                tracing::info!("Application initialized.");
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    tracing::info!("Close requested. Saving final window state...");
                    particle_background.stop();

                    let mut state_guard = app::helpers::lock_state(&state_for_events);
                    state_guard.cancel_current_task();
                    let scale = window_for_events.scale_factor();
                    let size = window_for_events.inner_size().to_logical::<f64>(scale);
                    state_guard.config.window_size = (size.width, size.height);
                    if let Ok(position) = window_for_events.outer_position() {
                        let position = position.to_logical::<f64>(scale);
                        state_guard.config.window_position = (position.x, position.y);
                    }

                    if let Err(e) = config::settings::save_config(&state_guard.config, None) {
                        tracing::error!("Failed to save config on exit: {}", e);
                    }
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                WindowEvent::Resized(size) => {
                    let size = size.to_logical::<f64>(window_for_events.scale_factor());
                    app::helpers::lock_state(&state_for_events).config.window_size =
                        (size.width, size.height);
                    particle_background.handle_resize();
                }
                WindowEvent::Moved(position) => {
                    let position = position.to_logical::<f64>(window_for_events.scale_factor());
                    app::helpers::lock_state(&state_for_events).config.window_position =
                        (position.x, position.y);
                }
                _ => (),
            },
            Event::UserEvent(user_event) => {
                app::handle_user_event(user_event, &webview, &mut particle_background);
            }
            _ => (),
        }

        background::pump_frame(&mut particle_background, &webview, Instant::now());
        *control_flow = match background::next_deadline(&particle_background) {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    });
}

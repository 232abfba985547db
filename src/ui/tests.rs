use super::*;
use crate::gesture::PointerEvent;
use crate::types::{GridRect, PixelPos};
use eframe::egui;

fn screen() -> egui::Rect {
    egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1200.0, 800.0))
}

/// Run a single headless egui frame with the provided input events and closure.
fn run_ui_with(events: Vec<egui::Event>, mut f: impl FnMut(&egui::Context)) -> egui::FullOutput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(screen());
    raw.events = events;

    let ctx = egui::Context::default();
    ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        f(ctx);
    })
}

/// Draw the canvas for one frame on an existing context.
fn canvas_frame(ctx: &egui::Context, app: &mut LayoutApp, events: Vec<egui::Event>) {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(screen());
    raw.events = events;
    let _ = ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

/// Run an empty frame and return the screen position of the surface origin.
fn surface_origin(ctx: &egui::Context, app: &mut LayoutApp) -> egui::Pos2 {
    canvas_frame(ctx, app, Vec::new());
    app.interaction
        .surface_rect
        .expect("canvas should record its rect")
        .min
}

fn press(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        },
    ]
}

fn release(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        },
    ]
}

fn key(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: Some(key),
        pressed: true,
        repeat: false,
        modifiers,
    }
}

/// Centre of a cell in screen space.
fn cell_center(origin: egui::Pos2, x: i32, y: i32) -> egui::Pos2 {
    origin + egui::vec2(x as f32 * 40.0 + 20.0, y as f32 * 40.0 + 20.0)
}

/// Places a block through the editor's own draw gesture.
fn place_block(app: &mut LayoutApp, footprint: GridRect) {
    let previous = app.editor.tool();
    app.editor.apply(Command::SelectTool(Tool::Draw));
    let cell = app.editor.cell_size();
    let at = |x: i32, y: i32| PixelPos::new(x as f32 * cell + 1.0, y as f32 * cell + 1.0);
    app.editor
        .handle_pointer(PointerEvent::Down(at(footprint.x, footprint.y)));
    app.editor.handle_pointer(PointerEvent::Move(at(
        footprint.right() - 1,
        footprint.bottom() - 1,
    )));
    app.editor.handle_pointer(PointerEvent::Up);
    app.editor.apply(Command::SelectTool(previous));
}

#[test]
fn dragging_on_canvas_draws_block() {
    let mut app = LayoutApp::default();
    let ctx = egui::Context::default();
    let origin = surface_origin(&ctx, &mut app);

    canvas_frame(&ctx, &mut app, press(cell_center(origin, 0, 0)));
    assert!(app.interaction.pointer_session_active);
    assert_eq!(app.editor.selection_preview(), Some(GridRect::new(0, 0, 1, 1)));

    canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(cell_center(origin, 1, 2))],
    );
    assert_eq!(app.editor.selection_preview(), Some(GridRect::new(0, 0, 2, 3)));

    canvas_frame(&ctx, &mut app, release(cell_center(origin, 1, 2)));
    assert!(!app.interaction.pointer_session_active);
    assert_eq!(app.editor.store().len(), 1);
    let block = app.editor.selected_block().expect("new block should be selected");
    assert_eq!(block.footprint(), GridRect::new(0, 0, 2, 3));
    assert_eq!(app.editor.selection_preview(), None);
}

#[test]
fn press_outside_canvas_is_ignored() {
    let mut app = LayoutApp::default();
    let ctx = egui::Context::default();
    let _ = surface_origin(&ctx, &mut app);

    let outside = egui::pos2(1000.0, 700.0);
    canvas_frame(&ctx, &mut app, press(outside));
    assert!(!app.interaction.pointer_session_active);
    canvas_frame(&ctx, &mut app, release(outside));

    assert!(app.editor.store().is_empty());
    assert_eq!(app.editor.selection_preview(), None);
}

#[test]
fn move_drag_clamps_and_release_outside_canvas_ends_it() {
    let mut app = LayoutApp::default();
    place_block(&mut app, GridRect::new(2, 1, 2, 2));
    app.editor.apply(Command::SelectTool(Tool::Move));

    let ctx = egui::Context::default();
    let origin = surface_origin(&ctx, &mut app);

    // Grab the block by its bottom-right cell.
    canvas_frame(&ctx, &mut app, press(cell_center(origin, 3, 2)));
    assert_eq!(app.editor.dragged_index(), Some(0));

    // The grab offset would put the block left of and above the grid.
    canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(origin + egui::vec2(5.0, 5.0))],
    );
    let block = &app.editor.blocks()[0];
    assert_eq!((block.x, block.y), (0, 0));

    // Moves off the surface are ignored, but the release still ends the drag.
    let outside = egui::pos2(1100.0, 750.0);
    canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(outside)]);
    assert_eq!(app.editor.dragged_index(), Some(0));
    canvas_frame(&ctx, &mut app, release(outside));

    assert!(!app.interaction.pointer_session_active);
    assert_eq!(app.editor.dragged_index(), None);
    let block = &app.editor.blocks()[0];
    assert_eq!((block.x, block.y), (0, 0));
}

#[test]
fn erase_click_removes_block_under_pointer() {
    let mut app = LayoutApp::default();
    place_block(&mut app, GridRect::new(1, 1, 2, 2));
    place_block(&mut app, GridRect::new(4, 0, 1, 1));
    app.editor.apply(Command::SelectTool(Tool::Erase));

    let ctx = egui::Context::default();
    let origin = surface_origin(&ctx, &mut app);

    canvas_frame(&ctx, &mut app, press(cell_center(origin, 2, 2)));
    canvas_frame(&ctx, &mut app, release(cell_center(origin, 2, 2)));

    assert_eq!(app.editor.store().len(), 1);
    assert_eq!(app.editor.blocks()[0].footprint(), GridRect::new(4, 0, 1, 1));
}

#[test]
fn select_click_on_empty_cell_clears_selection() {
    let mut app = LayoutApp::default();
    place_block(&mut app, GridRect::new(0, 0, 1, 1));
    app.editor.apply(Command::SelectTool(Tool::Select));
    assert_eq!(app.editor.selected_index(), Some(0));

    let ctx = egui::Context::default();
    let origin = surface_origin(&ctx, &mut app);
    canvas_frame(&ctx, &mut app, press(cell_center(origin, 3, 3)));
    canvas_frame(&ctx, &mut app, release(cell_center(origin, 3, 3)));

    assert_eq!(app.editor.selected_index(), None);
    assert_eq!(app.editor.store().len(), 1);
}

#[test]
fn hovering_updates_cell_readout() {
    let mut app = LayoutApp::default();
    let ctx = egui::Context::default();
    let origin = surface_origin(&ctx, &mut app);

    canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(cell_center(origin, 3, 1))],
    );
    assert_eq!(app.interaction.hovered_cell, Some((3, 1)));

    canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(egui::pos2(1100.0, 750.0))],
    );
    assert_eq!(app.interaction.hovered_cell, None);
}

#[test]
fn delete_key_removes_selected_block() {
    let mut app = LayoutApp::default();
    place_block(&mut app, GridRect::new(0, 0, 1, 1));
    assert_eq!(app.editor.selected_index(), Some(0));

    let _ = run_ui_with(vec![key(egui::Key::Delete, egui::Modifiers::NONE)], |ctx| {
        app.handle_shortcut_keys(ctx);
    });

    assert!(app.editor.store().is_empty());
    assert_eq!(app.editor.selected_index(), None);
}

#[test]
fn rotate_shortcuts_turn_selected_block() {
    let mut app = LayoutApp::default();
    place_block(&mut app, GridRect::new(0, 0, 2, 1));

    let _ = run_ui_with(vec![key(egui::Key::R, egui::Modifiers::NONE)], |ctx| {
        app.handle_shortcut_keys(ctx);
    });
    assert_eq!(app.editor.blocks()[0].rotation_degrees, 90);

    let _ = run_ui_with(vec![key(egui::Key::R, egui::Modifiers::SHIFT)], |ctx| {
        app.handle_shortcut_keys(ctx);
    });
    let _ = run_ui_with(vec![key(egui::Key::R, egui::Modifiers::SHIFT)], |ctx| {
        app.handle_shortcut_keys(ctx);
    });
    assert_eq!(app.editor.blocks()[0].rotation_degrees, 270);
}

#[test]
fn tool_and_escape_shortcuts() {
    let mut app = LayoutApp::default();
    place_block(&mut app, GridRect::new(0, 0, 1, 1));

    let _ = run_ui_with(
        vec![
            key(egui::Key::M, egui::Modifiers::NONE),
            key(egui::Key::Escape, egui::Modifiers::NONE),
        ],
        |ctx| {
            app.handle_shortcut_keys(ctx);
        },
    );

    assert_eq!(app.editor.tool(), Tool::Move);
    assert_eq!(app.editor.selected_index(), None);
}

#[test]
fn shortcuts_ignored_while_text_field_focused() {
    let mut app = LayoutApp::default();
    place_block(&mut app, GridRect::new(0, 0, 1, 1));
    let mut text = String::new();

    let _ = run_ui_with(
        vec![
            key(egui::Key::Backspace, egui::Modifiers::NONE),
            key(egui::Key::E, egui::Modifiers::NONE),
        ],
        |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.text_edit_singleline(&mut text).request_focus();
            });
            app.handle_shortcut_keys(ctx);
        },
    );

    assert_eq!(app.editor.store().len(), 1);
    assert_eq!(app.editor.tool(), Tool::Draw);
}

#[test]
fn grid_entry_commit_clamps_and_resyncs() {
    let mut app = LayoutApp::default();

    app.grid_input.width_text = "30".into();
    app.commit_grid_width();
    assert_eq!(app.editor.config().width_units(), 21);
    assert_eq!(app.grid_input.width_text, "21");

    app.grid_input.height_text = "abc".into();
    app.commit_grid_height();
    assert_eq!(app.editor.config().height_units(), 1);
    assert_eq!(app.grid_input.height_text, "1");

    app.grid_input.height_text = "8".into();
    app.commit_grid_height();
    assert_eq!(app.editor.config().height_units(), 8);
    assert_eq!(app.editor.surface_size(), (21.0 * 40.0, 8.0 * 40.0));
}

#[test]
fn drawing_canvas_with_blocks_produces_shapes() {
    let mut app = LayoutApp::default();
    place_block(&mut app, GridRect::new(0, 0, 2, 2));
    app.editor.apply(Command::RotateClockwise);

    let out = run_ui_with(vec![], |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });

    assert!(!out.shapes.is_empty(), "expected some shapes to be painted");
}

#[test]
fn properties_panel_renders_with_and_without_selection() {
    let mut app = LayoutApp::default();

    let _ = run_ui_with(Vec::new(), |ctx| {
        egui::SidePanel::right("properties_panel_test")
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                app.draw_properties_panel(ui);
            });
    });

    place_block(&mut app, GridRect::new(0, 0, 1, 1));
    app.editor.apply(Command::SetNickname("Screws".into()));

    let _ = run_ui_with(Vec::new(), |ctx| {
        egui::TopBottomPanel::top("toolbar_test").show(ctx, |ui| {
            app.draw_toolbar(ui);
        });
        egui::SidePanel::right("properties_panel_test")
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                app.draw_properties_panel(ui);
            });
    });

    // Rendering alone must not edit the block.
    let block = app.editor.selected_block().expect("block stays selected");
    assert_eq!(block.nickname, "Screws");
    assert_eq!(block.footprint(), GridRect::new(0, 0, 1, 1));
}

/// Draw the canvas in a small window so a large grid needs scroll bars.
fn small_canvas_frame(ctx: &egui::Context, app: &mut LayoutApp, events: Vec<egui::Event>) {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(600.0, 400.0),
    ));
    raw.events = events;
    let _ = ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

#[test]
fn press_on_scroll_bar_does_not_reach_grid() {
    let mut app = LayoutApp::default();
    app.editor.apply(Command::SetGridWidth(21));
    app.editor.apply(Command::SetGridHeight(21));
    // Row 9 spans the bottom edge of a 400 px tall window.
    place_block(&mut app, GridRect::new(2, 9, 1, 1));
    app.editor.apply(Command::SelectTool(Tool::Erase));

    let ctx = egui::Context::default();
    small_canvas_frame(&ctx, &mut app, Vec::new());
    small_canvas_frame(&ctx, &mut app, Vec::new());

    // Inside the surface rect and on the block, but under the horizontal scroll bar.
    let on_bar = egui::pos2(100.0, 390.0);
    let surface = app.interaction.surface_rect.expect("canvas should record its rect");
    assert!(surface.contains(on_bar));
    small_canvas_frame(&ctx, &mut app, press(on_bar));
    assert!(!app.interaction.pointer_session_active);
    small_canvas_frame(&ctx, &mut app, release(on_bar));
    assert_eq!(app.editor.store().len(), 1);

    // The visible part of the grid still takes presses.
    app.editor.apply(Command::SelectTool(Tool::Draw));
    let on_grid = surface.min + egui::vec2(20.0, 20.0);
    small_canvas_frame(&ctx, &mut app, press(on_grid));
    assert!(app.interaction.pointer_session_active);
    small_canvas_frame(&ctx, &mut app, release(on_grid));
    assert_eq!(app.editor.store().len(), 2);
}

/// Draw the canvas with a floating area covering part of its top-left corner.
fn covered_canvas_frame(ctx: &egui::Context, app: &mut LayoutApp, events: Vec<egui::Event>) {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(screen());
    raw.events = events;
    let _ = ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
        egui::Area::new(egui::Id::new("overlay"))
            .fixed_pos(egui::pos2(20.0, 20.0))
            .show(ctx, |ui| {
                ui.allocate_exact_size(egui::vec2(120.0, 120.0), egui::Sense::click());
            });
    });
}

#[test]
fn press_under_floating_area_is_ignored() {
    let mut app = LayoutApp::default();
    let ctx = egui::Context::default();
    covered_canvas_frame(&ctx, &mut app, Vec::new());
    covered_canvas_frame(&ctx, &mut app, Vec::new());
    let surface = app.interaction.surface_rect.expect("canvas should record its rect");

    let covered = egui::pos2(60.0, 60.0);
    assert!(surface.contains(covered));
    covered_canvas_frame(&ctx, &mut app, press(covered));
    assert!(!app.interaction.pointer_session_active);
    assert_eq!(app.editor.selection_preview(), None);
    covered_canvas_frame(&ctx, &mut app, release(covered));
    assert!(app.editor.store().is_empty());

    let uncovered = surface.max - egui::vec2(20.0, 20.0);
    covered_canvas_frame(&ctx, &mut app, press(uncovered));
    assert!(app.interaction.pointer_session_active);
    covered_canvas_frame(&ctx, &mut app, release(uncovered));
    assert_eq!(app.editor.store().len(), 1);
}

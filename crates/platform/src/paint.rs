//! Paints a shell render tree with egui.

use core_types::Color;
use egui::{Color32, Rect, Spinner, UiBuilder};
use shell::{Fill, OverlayNode, RenderNode, RenderTree, WebViewNode};

pub fn color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Walks the tree in paint order. `show_view` is handed the content area
/// for the web view node and whether the overlay covers it.
pub fn paint_tree(
    ctx: &egui::Context,
    tree: &RenderTree,
    show_view: &mut dyn FnMut(&mut egui::Ui, &WebViewNode, bool),
) {
    let RenderNode::Container {
        padding_top,
        padding_bottom,
        background,
        children,
        ..
    } = &tree.root
    else {
        return;
    };
    let overlay_present = tree.overlay().is_some();

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(color32(*background)))
        .show(ctx, |ui| {
            let full = ui.max_rect();
            let content = Rect::from_min_max(
                full.min + egui::vec2(0.0, *padding_top),
                full.max - egui::vec2(0.0, *padding_bottom),
            );
            for child in children {
                match child {
                    // the host applies the status bar style to the window
                    RenderNode::StatusBar { .. } => {}
                    RenderNode::WebView(node) => {
                        ui.scope_builder(UiBuilder::new().max_rect(content), |ui| {
                            show_view(ui, node, overlay_present);
                        });
                    }
                    RenderNode::LoadingOverlay(overlay) => paint_overlay(ctx, overlay),
                    RenderNode::Container { .. } => {
                        log::debug!("nested containers are not painted");
                    }
                }
            }
        });
}

fn paint_overlay(ctx: &egui::Context, overlay: &OverlayNode) {
    let rect = match overlay.fill {
        Fill::Viewport => ctx.screen_rect(),
        Fill::Parent => ctx.available_rect(),
    };
    egui::Area::new(egui::Id::new("loading_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(rect.min)
        .interactable(true)
        .show(ctx, |ui| {
            // swallow input meant for whatever sits underneath
            let (rect, _) = ui.allocate_exact_size(rect.size(), egui::Sense::click_and_drag());
            fill_with_indicator(ui, rect, overlay);
        });
}

pub fn fill_with_indicator(ui: &mut egui::Ui, rect: Rect, overlay: &OverlayNode) {
    ui.painter().rect_filled(rect, 0.0, color32(overlay.background));
    let extent = overlay.indicator.extent();
    let spinner_rect = Rect::from_center_size(rect.center(), egui::vec2(extent, extent));
    ui.put(
        spinner_rect,
        Spinner::new()
            .size(extent)
            .color(color32(overlay.indicator.color)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_convert_channel_for_channel() {
        let c = color32(Color::rgb(0x12, 0x12, 0x12));
        assert_eq!(c, Color32::from_rgb(0x12, 0x12, 0x12));
        assert_eq!(color32(Color::rgb(0xff, 0xff, 0xff)), Color32::WHITE);
    }
}

//! Standalone demo: opens a window with a single and a range slider.

use floem::prelude::*;
use floem::AnyView;
use floem::window::WindowConfig;
use floem_range_slider::{ModelValue, Options, range_slider};

fn sliders(single: RwSignal<ModelValue>, range: RwSignal<ModelValue>) -> AnyView {
    let single_options = Options {
        show_ticks: true,
        tick_step: Some(10.0),
        ..Options::with_bounds(0.0, 100.0)
    };
    let range_options = Options {
        min_range: Some(10.0),
        push_range: true,
        draggable_range: true,
        ..Options::with_bounds(0.0, 100.0)
    };
    let (Ok(single_view), Ok(range_view)) = (
        range_slider(single_options, single),
        range_slider(range_options, range),
    ) else {
        return label(|| "invalid slider options").into_any();
    };

    v_stack((
        single_view.style(|s| s.width_full()),
        label(move || format!("{:.0}", single.get().value)),
        range_view.style(|s| s.width_full()),
        label(move || {
            let model = range.get();
            format!(
                "{:.0} - {:.0}",
                model.value,
                model.high_value.unwrap_or_default()
            )
        }),
    ))
    .style(|s| s.padding(16.0).gap(8.0).width_full())
    .into_any()
}

fn main() {
    let single = RwSignal::new(ModelValue::single(40.0));
    let range = RwSignal::new(ModelValue::range(20.0, 60.0));

    floem::Application::new()
        .window(
            move |_| {
                sliders(single, range).on_event_stop(
                    floem::event::EventListener::WindowClosed,
                    |_| floem::quit_app(),
                )
            },
            Some(
                WindowConfig::default()
                    .size((320.0, 200.0))
                    .title("floem-range-slider"),
            ),
        )
        .run();
}

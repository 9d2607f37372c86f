#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use eframe::{egui, App, NativeOptions};
use tracing_subscriber::EnvFilter;

use phrasebook_gui::catalog::search::filter_sections;
use phrasebook_gui::catalog::section_state::{SectionStates, NARROW_WIDTH};
use phrasebook_gui::catalog::view::{
    examples_heading, phrase_button_label, result_message, EMPTY_CATALOG_MESSAGE,
    LOAD_FAILURE_MESSAGE, SPEECH_UNAVAILABLE_MESSAGE,
};
use phrasebook_gui::config::{load_config_from_file, Config};
use phrasebook_gui::parsing::document::load_document;
use phrasebook_gui::speech::{utterance_for, TtsPlayer, UtterancePlayer};
use phrasebook_gui::types::phrase_data::{Phrase, Section, SectionBody};

#[derive(Parser, Debug)]
#[command(name = "phrasebook_gui", about = "Browse and pronounce Greek phrases")]
struct CliArgs {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,
    /// Phrase document to load, overriding the configured path
    #[arg(long)]
    phrases: Option<PathBuf>,
    /// Preferred language tag for voices, overriding the configured one
    #[arg(long)]
    language: Option<String>,
}

/// A phrase button click waiting to be applied after the render pass.
enum SectionAction {
    Toggle,
    Speak { slot: String, phrase: Phrase },
}

struct SpeakingSlot {
    key: String,
    started: Instant,
}

struct PhrasebookApp {
    config: Config,
    config_error: Option<String>,
    phrases_path: PathBuf,
    sections: Vec<Section>,
    load_error: Option<String>,
    section_states: SectionStates,
    states_seeded: bool,
    search_query: String,
    player: Option<Box<dyn UtterancePlayer>>,
    speech_advisory: Option<String>,
    speaking: Option<SpeakingSlot>,
}

impl PhrasebookApp {
    fn new(_cc: &eframe::CreationContext<'_>, args: CliArgs) -> Self {
        let mut config_error = None;
        let mut config = match load_config_from_file(&args.config) {
            Ok(loaded_config) => loaded_config,
            Err(err_msg) => {
                tracing::warn!("{}", err_msg);
                config_error = Some(err_msg);
                Config::default()
            }
        };
        if let Some(language) = args.language {
            config.preferred_language = language;
        }
        let phrases_path = args
            .phrases
            .unwrap_or_else(|| PathBuf::from(&config.phrases_file));

        let (player, speech_advisory) = match TtsPlayer::initialize(config.language_code()) {
            Ok(player) => (
                Some(Box::new(player) as Box<dyn UtterancePlayer>),
                None,
            ),
            Err(err_msg) => {
                tracing::warn!("{}", err_msg);
                (None, Some(SPEECH_UNAVAILABLE_MESSAGE.to_string()))
            }
        };

        let mut app = Self {
            config,
            config_error,
            phrases_path,
            sections: Vec::new(),
            load_error: None,
            section_states: SectionStates::new(),
            states_seeded: false,
            search_query: String::new(),
            player,
            speech_advisory,
            speaking: None,
        };
        app.reload_phrases();
        app
    }

    fn reload_phrases(&mut self) {
        self.load_error = None;
        match load_document(&self.phrases_path) {
            Ok(sections) => {
                self.sections = sections;
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.sections = Vec::new();
                self.load_error = Some(LOAD_FAILURE_MESSAGE.to_string());
            }
        }
        // Section states are keyed by id and deliberately kept, so a
        // reload does not discard the user's expand/collapse choices.
        self.states_seeded = false;
        self.speaking = None;
    }

    fn speak_phrase(&mut self, slot: String, phrase: &Phrase) {
        let player = match self.player.as_mut() {
            Some(player) => player,
            None => return,
        };
        let request = utterance_for(
            phrase,
            &self.config.preferred_language,
            self.config.speech_rate,
        );
        match player.speak(&request) {
            Ok(()) => {
                tracing::debug!(text = %request.text, lang = %request.lang, "speaking phrase");
                self.speaking = Some(SpeakingSlot {
                    key: slot,
                    started: Instant::now(),
                });
            }
            Err(err_msg) => {
                tracing::error!("{}", err_msg);
                self.speaking = None;
            }
        }
    }

    fn settle_speaking_state(&mut self, ctx: &egui::Context) {
        let finished = match &self.speaking {
            Some(slot) => {
                let engine_speaking =
                    self.player.as_ref().map_or(false, |p| p.is_speaking());
                // Short grace period: backends report is_speaking=false
                // for a moment before playback actually starts.
                !engine_speaking && slot.started.elapsed() > Duration::from_millis(300)
            }
            None => false,
        };
        if finished {
            self.speaking = None;
        } else if self.speaking.is_some() {
            ctx.request_repaint_after(Duration::from_millis(150));
        }
    }
}

fn draw_phrase_button(
    ui: &mut egui::Ui,
    phrase: &Phrase,
    slot: &str,
    speaking: Option<&str>,
) -> bool {
    let mut button = egui::Button::new(phrase_button_label(phrase));
    if speaking == Some(slot) {
        button = button.fill(ui.visuals().selection.bg_fill);
    }
    ui.add(button).clicked()
}

/// Draw one collapsible section and report the click (if any) that needs
/// to mutate app state once the render pass is over.
fn draw_section(
    ui: &mut egui::Ui,
    section: &Section,
    items: &[usize],
    expanded: bool,
    speaking: Option<&str>,
) -> Option<SectionAction> {
    let mut action = None;

    let chevron = if expanded { "⏷" } else { "⏵" };
    let header = egui::RichText::new(format!("{} {}", chevron, section.title)).heading();
    if ui.button(header).clicked() {
        action = Some(SectionAction::Toggle);
    }

    if expanded {
        if let Some(description) = &section.description {
            ui.label(egui::RichText::new(description).weak());
        }
        match &section.body {
            SectionBody::Phrases(phrases) => {
                ui.horizontal_wrapped(|ui| {
                    for &index in items {
                        let phrase = &phrases[index];
                        let slot = format!("{}#{}", section.id, index);
                        if draw_phrase_button(ui, phrase, &slot, speaking) {
                            action = Some(SectionAction::Speak {
                                slot,
                                phrase: phrase.clone(),
                            });
                        }
                    }
                });
            }
            SectionBody::Rows(rows) => {
                for &index in items {
                    let row = &rows[index];
                    ui.group(|ui| {
                        if let Some(title) = &row.title {
                            ui.label(egui::RichText::new(title).strong());
                        }
                        if let Some(summary) = &row.summary {
                            ui.label(egui::RichText::new(summary).weak());
                        }
                        ui.horizontal_wrapped(|ui| {
                            for (variant_index, variant) in row.variants.iter().enumerate() {
                                let slot =
                                    format!("{}#{}/v{}", section.id, index, variant_index);
                                if draw_phrase_button(ui, variant, &slot, speaking) {
                                    action = Some(SectionAction::Speak {
                                        slot,
                                        phrase: variant.clone(),
                                    });
                                }
                            }
                        });
                        if !row.examples.is_empty() {
                            ui.add_space(4.0);
                            ui.small(examples_heading(row));
                            ui.horizontal_wrapped(|ui| {
                                for (example_index, example) in row.examples.iter().enumerate() {
                                    let slot =
                                        format!("{}#{}/e{}", section.id, index, example_index);
                                    if draw_phrase_button(ui, example, &slot, speaking) {
                                        action = Some(SectionAction::Speak {
                                            slot,
                                            phrase: example.clone(),
                                        });
                                    }
                                }
                            });
                        }
                    });
                }
            }
        }
    }
    ui.add_space(8.0);

    action
}

impl App for PhrasebookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.settle_speaking_state(ctx);

        if !self.states_seeded {
            let narrow = ctx.screen_rect().width() < NARROW_WIDTH;
            self.section_states.seed_defaults(&self.sections, narrow);
            self.states_seeded = true;
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Reload phrases").clicked() {
                        self.reload_phrases();
                        ui.close_menu();
                    }
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });

            ui.heading("Greek phrasebook");
            ui.horizontal(|ui| {
                ui.label("Search:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .hint_text("Type a phrase, a gloss, or part of one"),
                );
                if ui.button("Clear").clicked() {
                    self.search_query.clear();
                }
            });

            if let Some(err_msg) = &self.config_error {
                ui.colored_label(egui::Color32::YELLOW, err_msg);
            }
            if let Some(advisory) = &self.speech_advisory {
                ui.label(egui::RichText::new(advisory).weak());
            }
            ui.add_space(4.0);
        });

        let outcome = filter_sections(&self.sections, &self.search_query);
        let filtering = outcome.active;
        let speaking_key = self.speaking.as_ref().map(|slot| slot.key.clone());

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.load_error.is_none() && !self.sections.is_empty() {
                if let Some(message) = result_message(&outcome) {
                    ui.label(egui::RichText::new(message).italics());
                    ui.add_space(4.0);
                }
            }

            egui::ScrollArea::vertical()
                .id_source("sections_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if let Some(err_msg) = &self.load_error {
                        ui.colored_label(egui::Color32::RED, err_msg);
                        return;
                    }
                    if self.sections.is_empty() {
                        ui.label(EMPTY_CATALOG_MESSAGE);
                        return;
                    }

                    let mut actions: Vec<(usize, SectionAction)> = Vec::new();
                    for section_matches in &outcome.matches {
                        let section = &self.sections[section_matches.section];
                        // An active filter forces matching sections open
                        // without touching the stored flags.
                        let expanded =
                            filtering || self.section_states.is_expanded(&section.id);
                        if let Some(action) = draw_section(
                            ui,
                            section,
                            &section_matches.items,
                            expanded,
                            speaking_key.as_deref(),
                        ) {
                            actions.push((section_matches.section, action));
                        }
                    }

                    for (section_index, action) in actions {
                        match action {
                            SectionAction::Toggle => {
                                let id = self.sections[section_index].id.clone();
                                self.section_states.toggle(&id);
                            }
                            SectionAction::Speak { slot, phrase } => {
                                self.speak_phrase(slot, &phrase);
                            }
                        }
                    }
                });
        });
    }
}

fn main() -> Result<(), eframe::Error> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Greek Phrasebook",
        options,
        Box::new(move |cc| Box::new(PhrasebookApp::new(cc, args))),
    )
}

use iced::widget::{
    button, checkbox, column, container, pick_list, progress_bar, row, scrollable, slider, text,
    text_input, Space,
};
use iced::{Background, Border, Element, Length};
use newsdesk_core::{
    AppViewModel, ChartBar, ChartTab, CrawlerView, Msg, Page, RelevanceView, ResultsView,
    SelectedFileView, MAX_NEWS_MAX, MAX_NEWS_MIN, MAX_NEWS_STEP,
};

use super::constants::*;
use crate::platform::app::Message;

fn core(msg: Msg) -> Message {
    Message::Core(msg)
}

pub fn page(view: &AppViewModel) -> Element<'_, Message> {
    match view.page {
        Page::Home => home(),
        Page::Crawler => crawler(&view.crawler),
        Page::Relevance => relevance(&view.relevance),
        Page::Results => results(&view.results),
        Page::NotFound => not_found(),
    }
}

fn page_title<'a>(title: &'a str, subtitle: &'a str) -> Element<'a, Message> {
    column![
        text(title).size(TITLE_SIZE),
        text(subtitle).size(BODY_SIZE).color(TEXT_MUTED),
    ]
    .spacing(4)
    .into()
}

fn card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(SURFACE)),
            border: Border {
                color: BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn home<'a>() -> Element<'a, Message> {
    let steps = [
        (
            Page::Crawler,
            "1. Collect news",
            "Search Naver news for your keywords and store the articles as a CSV file.",
        ),
        (
            Page::Relevance,
            "2. Evaluate relevance",
            "Let a language model mark which collected articles matter and classify them.",
        ),
        (
            Page::Results,
            "3. Review results",
            "Browse result files, look at category and keyword charts, and download them.",
        ),
    ];

    let cards = steps.into_iter().map(|(page, title, description)| {
        card(
            column![
                text(title).size(HEADING_SIZE),
                text(description).size(BODY_SIZE).color(TEXT_MUTED),
                Space::with_height(Length::Fill),
                button(text("Open").size(BODY_SIZE))
                    .on_press(core(Msg::Navigate(page)))
                    .style(button::primary),
            ]
            .spacing(ITEM_SPACING)
            .height(180),
        )
    });

    column![
        page_title(
            "Newsdesk",
            "Collect news by keyword, evaluate relevance with an LLM and review the results.",
        ),
        row(cards).spacing(SECTION_SPACING),
    ]
    .spacing(SECTION_SPACING)
    .into()
}

fn crawler(view: &CrawlerView) -> Element<'_, Message> {
    let input_row = row![
        text_input("Enter a keyword", &view.input)
            .on_input(|text| core(Msg::KeywordInputChanged(text)))
            .on_submit(core(Msg::KeywordAdded))
            .padding(8),
        button(text("Add"))
            .on_press_maybe(view.can_add.then(|| core(Msg::KeywordAdded)))
            .style(button::primary),
        pick_list(
            view.presets.clone(),
            view.selected_preset.clone(),
            |name| core(Msg::KeywordPresetSelected(name)),
        )
        .placeholder("Keyword presets"),
    ]
    .spacing(ITEM_SPACING)
    .align_y(iced::Alignment::Center);

    let chips: Element<'_, Message> = if view.keywords.is_empty() {
        text("No keywords yet.")
            .size(BODY_SIZE)
            .color(TEXT_MUTED)
            .into()
    } else {
        row(view.keywords.iter().enumerate().map(|(index, keyword)| {
            button(text(format!("{keyword}  ×")).size(BODY_SIZE))
                .on_press(core(Msg::KeywordRemoved(index)))
                .style(button::secondary)
                .into()
        }))
        .spacing(ITEM_SPACING)
        .wrap()
        .into()
    };

    let mut keywords = column![
        row![
            text("Keywords").size(HEADING_SIZE),
            Space::with_width(Length::Fill),
            button(text("Save keywords").size(BODY_SIZE))
                .on_press_maybe(view.can_save.then(|| core(Msg::KeywordsSaved)))
                .style(button::secondary),
            button(text("Clear").size(BODY_SIZE))
                .on_press_maybe((!view.keywords.is_empty()).then(|| core(Msg::KeywordsCleared)))
                .style(button::danger),
        ]
        .spacing(ITEM_SPACING)
        .align_y(iced::Alignment::Center),
        input_row,
        chips,
    ]
    .spacing(12);

    if !view.saved_keywords.is_empty() {
        keywords = keywords.push(
            column![
                text("Saved keywords").size(CAPTION_SIZE).color(TEXT_MUTED),
                row(view.saved_keywords.iter().map(|keyword| {
                    button(text(keyword).size(CAPTION_SIZE))
                        .on_press(core(Msg::SavedKeywordLoaded(keyword.clone())))
                        .style(button::text)
                        .into()
                }))
                .spacing(4)
                .wrap(),
            ]
            .spacing(4),
        );
    }

    let limits = column![
        text(format!("Max news per keyword: {}", view.max_news)).size(HEADING_SIZE),
        slider(MAX_NEWS_MIN..=MAX_NEWS_MAX, view.max_news, |value| {
            core(Msg::MaxNewsChanged(value))
        })
        .step(MAX_NEWS_STEP),
        text(&view.summary).size(BODY_SIZE).color(TEXT_MUTED),
    ]
    .spacing(ITEM_SPACING);

    let crawl_label = if view.crawling {
        "Crawling..."
    } else {
        "Start crawl"
    };

    column![
        page_title(
            "News crawl",
            "Collect Naver news articles for each keyword. Large crawls can take several minutes.",
        ),
        card(keywords),
        card(limits),
        button(text(crawl_label).size(BODY_SIZE + 2))
            .on_press_maybe(view.can_crawl.then(|| core(Msg::CrawlClicked)))
            .style(button::primary)
            .padding([10, 24]),
    ]
    .spacing(SECTION_SPACING)
    .into()
}

fn relevance(view: &RelevanceView) -> Element<'_, Message> {
    let file_names: Vec<String> = view.files.iter().map(|f| f.file_name.clone()).collect();
    let mut file_section = column![
        row![
            text("File to evaluate").size(HEADING_SIZE),
            Space::with_width(Length::Fill),
            button(text("Refresh").size(BODY_SIZE))
                .on_press_maybe((!view.files_loading).then(|| core(Msg::RefreshFiles)))
                .style(button::secondary),
        ]
        .align_y(iced::Alignment::Center),
        pick_list(file_names, view.selected_file.clone(), |name| {
            core(Msg::EvaluationFileChosen(name))
        })
        .placeholder("Choose a file")
        .width(Length::Fill),
    ]
    .spacing(ITEM_SPACING);

    if view.files_loading {
        file_section = file_section.push(text("Loading files...").size(CAPTION_SIZE));
    } else if view.files.is_empty() {
        file_section = file_section.push(
            text("No files are waiting for evaluation. Run a crawl first.")
                .size(CAPTION_SIZE)
                .color(TEXT_MUTED),
        );
    }

    let key_section = column![
        text("API key").size(HEADING_SIZE),
        row![
            text_input("OpenAI or Anthropic API key", view.api_key.expose())
                .on_input(|text| core(Msg::ApiKeyChanged(text)))
                .secure(!view.api_key_visible)
                .padding(8),
            button(text(if view.api_key_visible { "Hide" } else { "Show" }).size(BODY_SIZE))
                .on_press(core(Msg::ApiKeyVisibilityToggled))
                .style(button::secondary),
            button(text("Save key").size(BODY_SIZE))
                .on_press_maybe(view.can_save_key.then(|| core(Msg::ApiKeySaved)))
                .style(button::secondary),
        ]
        .spacing(ITEM_SPACING)
        .align_y(iced::Alignment::Center),
        text("The key is stored on this computer and only sent with evaluation requests.")
            .size(CAPTION_SIZE)
            .color(TEXT_MUTED),
    ]
    .spacing(ITEM_SPACING);

    let model_section = column![
        text("Model").size(HEADING_SIZE),
        pick_list(view.models.clone(), Some(view.model.clone()), |model| {
            core(Msg::ModelSelected(model))
        }),
        text(view.model_description)
            .size(CAPTION_SIZE)
            .color(TEXT_MUTED),
    ]
    .spacing(ITEM_SPACING);

    let evaluate_label = if view.evaluating {
        "Evaluating..."
    } else {
        "Start evaluation"
    };

    column![
        page_title(
            "Relevance evaluation",
            "Score collected articles with a language model. Only files without an evaluation are listed.",
        ),
        card(file_section),
        card(key_section),
        card(model_section),
        button(text(evaluate_label).size(BODY_SIZE + 2))
            .on_press_maybe(view.can_evaluate.then(|| core(Msg::EvaluateClicked)))
            .style(button::primary)
            .padding([10, 24]),
    ]
    .spacing(SECTION_SPACING)
    .into()
}

fn results(view: &ResultsView) -> Element<'_, Message> {
    let header = row![
        text(format!("{} files", view.file_count)).size(HEADING_SIZE),
        Space::with_width(Length::Fill),
        button(text("Refresh").size(BODY_SIZE))
            .on_press_maybe((!view.files_loading).then(|| core(Msg::RefreshFiles)))
            .style(button::secondary),
        button(text("Bulk download").size(BODY_SIZE))
            .on_press_maybe(view.bulk.can_open.then(|| core(Msg::BulkDialogOpened)))
            .style(button::primary),
    ]
    .spacing(ITEM_SPACING)
    .align_y(iced::Alignment::Center);

    let mut content = column![
        page_title(
            "Results",
            "Browse result files, inspect their statistics and download them.",
        ),
        card(column![header, file_table(view)].spacing(12)),
    ]
    .spacing(SECTION_SPACING);

    if let Some(selected) = &view.selected {
        content = content.push(card(selected_panel(view, selected)));
    } else if view.loading_details {
        content = content.push(card(text("Loading file details...").size(BODY_SIZE)));
    }

    content.into()
}

fn file_table(view: &ResultsView) -> Element<'_, Message> {
    if view.files.is_empty() {
        let message = if view.files_loading {
            "Loading files..."
        } else {
            "No result files yet."
        };
        return text(message).size(BODY_SIZE).color(TEXT_MUTED).into();
    }

    let header = row![
        text("File name").size(CAPTION_SIZE).width(Length::FillPortion(5)),
        text("Modified").size(CAPTION_SIZE).width(Length::FillPortion(2)),
        text("Size").size(CAPTION_SIZE).width(Length::FillPortion(1)),
        text("Status").size(CAPTION_SIZE).width(Length::FillPortion(1)),
    ]
    .padding([0, 10]);

    let rows = view.files.iter().map(|file| {
        let status = if file.loading {
            "Loading..."
        } else if file.record.evaluated {
            "Evaluated"
        } else {
            "Not evaluated"
        };
        let status_color = if file.record.evaluated {
            SUCCESS
        } else {
            TEXT_MUTED
        };
        let selected = file.selected;
        button(
            row![
                text(&file.record.file_name)
                    .size(BODY_SIZE)
                    .width(Length::FillPortion(5)),
                text(&file.record.modified_label)
                    .size(BODY_SIZE)
                    .width(Length::FillPortion(2)),
                text(&file.record.size_label)
                    .size(BODY_SIZE)
                    .width(Length::FillPortion(1)),
                text(status)
                    .size(CAPTION_SIZE)
                    .color(status_color)
                    .width(Length::FillPortion(1)),
            ]
            .align_y(iced::Alignment::Center),
        )
        .on_press(core(Msg::FileSelected(file.record.file_name.clone())))
        .width(Length::Fill)
        .padding([8, 10])
        .style(move |theme, status| {
            let mut style = button::text(theme, status);
            if selected {
                style.background = Some(Background::Color(SELECTED_ROW));
            }
            style
        })
        .into()
    });

    column![header, scrollable(column(rows).spacing(2)).height(320)]
        .spacing(4)
        .into()
}

fn selected_panel<'a>(
    view: &'a ResultsView,
    selected: &'a SelectedFileView,
) -> Element<'a, Message> {
    let mut facts = vec![format!("Articles: {}", selected.total_rows)];
    if let Some(size) = &selected.size_label {
        facts.push(format!("Size: {size}"));
    }
    if let Some(modified) = &selected.modified_label {
        facts.push(format!("Modified: {modified}"));
    }
    if let Some(summary) = &selected.relevance_summary {
        facts.push(format!("Relevant: {summary}"));
    }

    let header = row![
        text(&selected.file_name).size(HEADING_SIZE),
        Space::with_width(Length::Fill),
        button(text("Preview").size(BODY_SIZE))
            .on_press_maybe(view.preview.is_some().then(|| core(Msg::PreviewToggled(true))))
            .style(button::secondary),
        button(text("Download").size(BODY_SIZE))
            .on_press(core(Msg::DownloadSelectedClicked))
            .style(button::primary),
    ]
    .spacing(ITEM_SPACING)
    .align_y(iced::Alignment::Center);

    let tabs = row(
        [
            (ChartTab::Categories, "Categories"),
            (ChartTab::Relevance, "Relevance"),
            (ChartTab::Keywords, "Top keywords"),
        ]
        .into_iter()
        .map(|(tab, label)| {
            let style = if tab == view.tab {
                button::primary
            } else {
                button::secondary
            };
            button(text(label).size(BODY_SIZE))
                .on_press(core(Msg::ChartTabSelected(tab)))
                .style(style)
                .into()
        }),
    )
    .spacing(4);

    let chart = match view.tab {
        ChartTab::Categories => bar_chart(&view.charts.categories, "No category data in this file."),
        ChartTab::Relevance => match &view.charts.relevance {
            Some(bars) => bar_chart(bars, "No relevance data in this file."),
            None => empty_chart("This file has not been evaluated yet."),
        },
        ChartTab::Keywords => bar_chart(&view.charts.keywords, "No keyword data in this file."),
    };

    column![
        header,
        text(facts.join("   ·   ")).size(BODY_SIZE).color(TEXT_MUTED),
        tabs,
        chart,
    ]
    .spacing(12)
    .into()
}

fn bar_chart<'a>(bars: &'a [ChartBar], empty_message: &'a str) -> Element<'a, Message> {
    if bars.is_empty() {
        return empty_chart(empty_message);
    }
    column(bars.iter().map(|bar| {
        let fill = color(bar.color);
        row![
            text(&bar.label)
                .size(BODY_SIZE)
                .width(CHART_LABEL_WIDTH),
            progress_bar(0.0..=1.0, bar.fraction)
                .height(CHART_BAR_HEIGHT)
                .style(move |_theme| progress_bar::Style {
                    background: Background::Color(CHART_TRACK),
                    bar: Background::Color(fill),
                    border: Border::default(),
                }),
            text(bar.count.to_string()).size(BODY_SIZE).width(60),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center)
        .into()
    }))
    .spacing(6)
    .into()
}

fn empty_chart(message: &str) -> Element<'_, Message> {
    text(message).size(BODY_SIZE).color(TEXT_MUTED).into()
}

fn not_found<'a>() -> Element<'a, Message> {
    column![
        page_title("Page not found", "The page you asked for does not exist."),
        button(text("Back to home").size(BODY_SIZE))
            .on_press(core(Msg::Navigate(Page::Home)))
            .style(button::primary),
    ]
    .spacing(SECTION_SPACING)
    .into()
}

fn dialog<'a>(content: impl Into<Element<'a, Message>>, width: f32) -> Element<'a, Message> {
    container(content)
        .padding(20)
        .width(width)
        .style(|_theme| container::Style {
            background: Some(Background::Color(iced::Color::WHITE)),
            border: Border {
                color: BORDER,
                width: 1.0,
                radius: 10.0.into(),
            },
            ..Default::default()
        })
        .into()
}

pub fn bulk_dialog(view: &AppViewModel) -> Element<'_, Message> {
    let bulk = &view.results.bulk;
    let entries = bulk.entries.iter().map(|entry| {
        let file_name = entry.file_name.clone();
        column![
            checkbox(&entry.file_name, entry.checked)
                .on_toggle(move |_| core(Msg::BulkFileToggled(file_name.clone()))),
            text(&entry.caption).size(CAPTION_SIZE).color(TEXT_MUTED),
        ]
        .spacing(2)
        .into()
    });

    dialog(
        column![
            text("Download several files").size(HEADING_SIZE),
            text("Files are downloaded one after another, one second apart.")
                .size(CAPTION_SIZE)
                .color(TEXT_MUTED),
            checkbox(
                format!(
                    "Select all ({}/{})",
                    bulk.selected_count,
                    bulk.entries.len()
                ),
                bulk.all_selected,
            )
            .on_toggle(|_| core(Msg::BulkSelectAllToggled)),
            scrollable(column(entries).spacing(ITEM_SPACING)).height(360),
            row![
                Space::with_width(Length::Fill),
                button(text("Cancel").size(BODY_SIZE))
                    .on_press(core(Msg::BulkDialogClosed))
                    .style(button::secondary),
                button(text(format!("Download {} files", bulk.selected_count)).size(BODY_SIZE))
                    .on_press_maybe(bulk.can_confirm.then(|| core(Msg::BulkDownloadConfirmed)))
                    .style(button::primary),
            ]
            .spacing(ITEM_SPACING),
        ]
        .spacing(12),
        DIALOG_WIDTH,
    )
}

pub fn preview_dialog(view: &AppViewModel) -> Element<'_, Message> {
    let results = &view.results;
    let Some(preview) = &results.preview else {
        return dialog(text("No preview available.").size(BODY_SIZE), DIALOG_WIDTH);
    };
    let title = results
        .selected
        .as_ref()
        .map(|selected| selected.file_name.as_str())
        .unwrap_or("Preview");

    let header = row(preview.columns.iter().map(|name| {
        text(name)
            .size(CAPTION_SIZE)
            .width(PREVIEW_CELL_WIDTH)
            .into()
    }))
    .spacing(ITEM_SPACING);
    let rows = preview.rows.iter().map(|cells| {
        row(cells.iter().map(|cell| {
            text(cell)
                .size(CAPTION_SIZE)
                .width(PREVIEW_CELL_WIDTH)
                .into()
        }))
        .spacing(ITEM_SPACING)
        .into()
    });

    let shown = match preview.total_rows {
        Some(total) => format!("Showing {} of {} rows", preview.rows.len(), total),
        None => format!("Showing {} rows", preview.rows.len()),
    };

    dialog(
        column![
            text(title).size(HEADING_SIZE),
            text(shown).size(CAPTION_SIZE).color(TEXT_MUTED),
            scrollable(column![header, column(rows).spacing(6)].spacing(8))
                .direction(scrollable::Direction::Both {
                    vertical: scrollable::Scrollbar::default(),
                    horizontal: scrollable::Scrollbar::default(),
                })
                .height(420),
            row![
                Space::with_width(Length::Fill),
                button(text("Close").size(BODY_SIZE))
                    .on_press(core(Msg::PreviewToggled(false)))
                    .style(button::secondary),
            ],
        ]
        .spacing(12),
        PREVIEW_DIALOG_WIDTH,
    )
}

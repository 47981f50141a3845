use std::io::{BufRead, Write};

use crate::error::AppResult;
use crate::services::{Recommender, DEFAULT_RECOMMENDATION_COUNT};
use crate::store::PreferenceStore;

/// Cuisines offered at the start of each round
const CUISINE_SAMPLE_SIZE: usize = 5;

enum Flow {
    Continue,
    Quit,
}

/// Runs the interactive prompt loop until the user exits or input ends
///
/// Reads from `input` and writes to `output` so tests can drive the loop
/// with scripted lines and capture what the user would see.
pub fn run<S, R, W>(engine: &mut Recommender<S>, mut input: R, mut output: W) -> AppResult<()>
where
    S: PreferenceStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "\n-----Welcome to the Meal Recommendation System!-----")?;
    writeln!(
        output,
        "-----Please enter 'exit' to quit the system at any time.-----"
    )?;
    writeln!(output, "-----Enter 'reset' to reset your preferences.-----")?;

    if engine.state().total_selections > 0 {
        offer_startup_reset(engine, &mut input, &mut output)?;
    }

    loop {
        let Some(choice) = prompt(
            &mut input,
            &mut output,
            "\nAny recommendation? (yes/no/exit/reset): ",
        )?
        else {
            break;
        };

        match choice.to_lowercase().as_str() {
            "exit" => {
                writeln!(output, "Exiting the system...")?;
                break;
            }
            "reset" => {
                let Some(confirm) = prompt(
                    &mut input,
                    &mut output,
                    "Are you sure you want to reset all your preferences? (yes/no): ",
                )?
                else {
                    break;
                };
                if confirm.to_lowercase() == "yes" {
                    engine.reset_preferences()?;
                    writeln!(output, "User preferences have been reset successfully!")?;
                } else {
                    writeln!(output, "Reset cancelled.")?;
                }
            }
            "yes" => {
                if let Flow::Quit = recommendation_round(engine, &mut input, &mut output)? {
                    writeln!(output, "Exiting the system...")?;
                    break;
                }
            }
            "no" => {
                writeln!(
                    output,
                    "zzzzz System is in sleep mode, enter anything to wake it up. zzzzz"
                )?;
                if read_line(&mut input)?.is_none() {
                    break;
                }
            }
            _ => writeln!(output, "Invalid input, please enter 'yes' or 'no'.")?,
        }
    }

    Ok(())
}

/// One full round: pick a cuisine, show its recommendations, record a choice
fn recommendation_round<S, R, W>(
    engine: &mut Recommender<S>,
    input: &mut R,
    output: &mut W,
) -> AppResult<Flow>
where
    S: PreferenceStore,
    R: BufRead,
    W: Write,
{
    let cuisines = engine.random_cuisines(CUISINE_SAMPLE_SIZE);
    writeln!(
        output,
        "\nThere are some cuisines I have chosen to recommend to you:"
    )?;
    for (i, cuisine) in cuisines.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, cuisine)?;
    }

    loop {
        let Some(raw) = prompt(
            input,
            output,
            "\nPlease select a cuisine(index or name), or enter another cuisine name you prefer: ",
        )?
        else {
            return Ok(Flow::Quit);
        };
        if raw == "exit" {
            return Ok(Flow::Quit);
        }

        let choice = if let Ok(index) = raw.parse::<usize>() {
            match index.checked_sub(1).and_then(|i| cuisines.get(i)) {
                Some(cuisine) => cuisine.clone(),
                None => {
                    writeln!(output, "Invalid index, please try again")?;
                    continue;
                }
            }
        } else {
            raw
        };

        let Some(cuisine) = engine
            .catalog()
            .canonical_cuisine(&choice)
            .map(str::to_string)
        else {
            writeln!(output, "'{choice}' is not a valid cuisine, please try again")?;
            continue;
        };

        let recommendations = engine.recommend(&cuisine, DEFAULT_RECOMMENDATION_COUNT)?;
        if recommendations.is_empty() {
            writeln!(
                output,
                "There are no dishes in '{cuisine}', please try another cuisine"
            )?;
            continue;
        }

        writeln!(output, "\nRecommended dishes of {cuisine}:")?;
        for (i, dish) in recommendations.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, dish)?;
        }

        let selected = loop {
            let Some(raw) = prompt(
                input,
                output,
                "\nPlease select a dish(index or name), or enter another dish name you prefer(case sensitive): ",
            )?
            else {
                return Ok(Flow::Quit);
            };
            if raw == "exit" {
                return Ok(Flow::Quit);
            }

            // An out-of-range index falls through and is treated as a name
            let candidate = raw
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|i| recommendations.get(i).cloned())
                .unwrap_or(raw);

            if engine.catalog().dish_exists(&candidate, Some(&cuisine)) {
                writeln!(output, "You've selected '{candidate}' from '{cuisine}'")?;
                break candidate;
            }

            match engine
                .catalog()
                .find_cuisine_for_dish(&candidate)
                .map(str::to_string)
            {
                Some(home) => {
                    writeln!(output, "'{candidate}' is found in '{home}'")?;
                    break candidate;
                }
                None => {
                    writeln!(
                        output,
                        "There is no dish named '{candidate}', please try again"
                    )?;
                }
            }
        };

        engine.record_selection(&selected)?;
        writeln!(
            output,
            "\n-----You have chosen: {selected}, enjoy your meal!-----"
        )?;
        return Ok(Flow::Continue);
    }
}

fn offer_startup_reset<S, R, W>(
    engine: &mut Recommender<S>,
    input: &mut R,
    output: &mut W,
) -> AppResult<()>
where
    S: PreferenceStore,
    R: BufRead,
    W: Write,
{
    let Some(choice) = prompt(
        input,
        output,
        "\nWould you like to reset your preferences? (yes/no): ",
    )?
    else {
        return Ok(());
    };
    if choice.to_lowercase() == "yes" {
        engine.reset_preferences()?;
        writeln!(output, "User preferences have been reset successfully!")?;
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> AppResult<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;
    read_line(input)
}

/// Reads one trimmed line, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> AppResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

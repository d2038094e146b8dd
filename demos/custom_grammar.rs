use phonogram::{Grammar, GrammarBuilder, GrammarConfig, UtteranceConfig};
use std::error::Error;

/// Example of building grammars and turning them into words and patterns
fn main() -> Result<(), Box<dyn Error>> {
    // Example 1: Parse a grammar from text
    let grammar: Grammar = "
        # consonant-vowel syllables
        Syllable := C V n?
        C := p | t | k | m
        V := a | i | o
    "
    .parse()?;

    println!("Syllables:");
    for i in 1..=5 {
        println!("{}. {}", i, grammar.generate()?);
    }
    println!("Pattern: {}", grammar.to_pattern()?);

    // Example 2: Build a grammar programmatically
    let mut config = GrammarConfig::default();
    config.max_recursion_depth = 20;

    let grammar = GrammarBuilder::new()
        .config(config)
        .rule("Syllable", "Onset? Vowel Coda?")
        .rule("Onset", "Stop | s Stop | Stop w")
        .rule("Stop", "p | t | k | c")
        .rule("Vowel", "a | i | o | â | î | ô | ê")
        .rule("Coda", "n | s | h")
        .build()?;

    println!("\nWords:");
    for i in 1..=5 {
        println!("{}. {}", i, phonogram::assemble(&grammar, 2, 5)?);
    }
    println!("Pattern: {}", grammar.to_pattern()?);

    // Example 3: The bundled grammar with a custom word length
    let cree: Grammar = phonogram::PLAINS_CREE.parse()?;
    let words = UtteranceConfig::fragments(1, 3);
    let mut rng = rand::thread_rng();

    println!("\nShort Plains Cree pseudo-words:");
    for i in 1..=5 {
        println!("{}. {}", i, phonogram::assemble_with(&cree, &words, &mut rng)?);
    }

    Ok(())
}

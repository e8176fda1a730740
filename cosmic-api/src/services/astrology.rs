//! Astrological significance of the planets
//!
//! Served from a built-in table; no upstream call is made.

use cosmic_common::PlanetQuery;

/// Astrology text for a body, or a generic text naming it
pub fn astrology_text(planet: &PlanetQuery) -> String {
    match known_text(planet.key()) {
        Some(text) => text.to_string(),
        None => generic_text(planet.name()),
    }
}

fn known_text(key: &str) -> Option<&'static str> {
    let text = match key {
        "mercury" => "In astrology, Mercury governs communication, intellect and reasoning. As the planet \
            closest to the Sun it stands for quick thinking and adaptability, and its retrograde periods are \
            blamed for miscommunication and technical mishaps. Mercury rules Gemini and Virgo, and its \
            placement in a birth chart shows how a person processes information, expresses ideas and solves \
            problems. Linked to Hermes, messenger of the gods, it also governs travel and commerce.",
        "venus" => "Venus represents love, beauty, pleasure and personal values. Ruler of Taurus and Libra, \
            it shapes how we approach relationships, aesthetics and comfort. In a birth chart Venus shows \
            what a person finds beautiful and how they express affection. Its 584-day synodic cycle traces a \
            five-pointed star across the sky, a pattern many ancient cultures held sacred, and its retrograde \
            periods are said to bring old relationships back for resolution.",
        "earth" => "Earth is the vantage point from which every other body is observed, so it is rarely read \
            as a planetary influence in a birth chart. Where it is used, Earth stands for groundedness, \
            practicality and physical existence, the counterpart to the Sun that shows how a solar purpose \
            is made real. Its seasons and axial tilt supply the cycles on which much of astrology is built.",
        "mars" => "Mars, the red planet, represents action, desire, courage and assertiveness. Ruler of Aries \
            and traditional ruler of Scorpio, it drives how we pursue goals, express anger and experience \
            passion. Mars spends about six weeks in each sign during its two-year orbit, and its placement \
            in a chart shows where a person is most motivated to act and how they fight for what they want.",
        "jupiter" => "Jupiter, the largest planet, represents expansion, abundance, wisdom and good fortune. \
            Ruler of Sagittarius and traditional ruler of Pisces, it governs philosophy, higher learning and \
            belief. Spending roughly a year in each sign of its twelve-year orbit, the 'Great Benefic' marks \
            periods of growth and opportunity, and its chart placement shows where a person seeks meaning.",
        "saturn" => "Saturn represents structure, discipline, responsibility and hard-won lessons. Ruler of \
            Capricorn and traditional ruler of Aquarius, it shapes ambition, boundaries and our relationship \
            with authority. Its 29.5-year orbit produces the famous 'Saturn Returns' around ages 29, 58 and \
            87. Known as the 'Great Teacher', Saturn shows where patience and persistence lead to mastery.",
        "uranus" => "Uranus, the sideways-spinning planet, represents revolution, innovation, sudden change \
            and individuality. Ruler of Aquarius, it governs originality and humanitarian impulses. Its \
            84-year orbit spends about seven years in each sign, shaping generational breakthroughs. \
            Discovered in 1781 during an age of revolutions, Uranus shows where a person resists conformity.",
        "neptune" => "Neptune represents dreams, intuition, spirituality and transcendence. Ruler of Pisces, \
            it governs imagination, compassion and the collective unconscious, revealing where boundaries \
            dissolve and where we are idealistic or prone to illusion. Its 165-year orbit spends about \
            fourteen years in each sign, colouring generational spiritual and artistic movements.",
        "pluto" => "Pluto, though reclassified by astronomers, remains a potent force in astrology, standing \
            for transformation, power, death and rebirth. Ruler of Scorpio, it governs control, intimacy and \
            psychological depth. Its eccentric 248-year orbit spends between 12 and 31 years in a sign, and \
            its placement shows where a person undergoes profound change and finds untapped resources.",
        _ => return None,
    };
    Some(text)
}

fn generic_text(name: &str) -> String {
    format!(
        "The astrological significance of {name} connects to themes of cosmic awareness and spiritual \
         growth. Across traditions, {name} has been associated with particular qualities and archetypal \
         energies that surface in both personal and collective experience. Its orbital patterns and its \
         relationships with other bodies create signatures that astrologers read as cycles of growth, \
         challenge and transformation. When prominent in a birth chart, {name} lends distinctive qualities \
         to personality, life direction and spiritual development."
    )
}

// Hand-authored fallback captions, one pool per format.
//
// These guarantee the ad endpoint always produces output, even with
// zero connectivity to the text provider. Pool strings are trusted and
// skip length validation.

use crate::core::types::{AdFormat, AdSource, AdText};
use rand::Rng;

const PRODUCT_SLOT: &str = "{product}";

/// Two-line catchy templates
static SHORT_TEMPLATES: [&str; 10] = [
    "🌾 {product} - Where Strong Animals Begin! 💪\nHealthy livestock, profitable future. Order now! 🐓",
    "🌟 Premium {product} for Superior Growth! 💚\nTrusted by farmers nationwide. Get yours today!",
    "🐄 {product} - The Smart Farmer's Choice! ✨\nBetter nutrition, better results. Call us now!",
    "💚 {product} - Quality You Can Trust! 🌾\nWatch your animals thrive. Available now!",
    "🚜 {product} - Proven Results, Happy Farmers! 🐥\nOrder today for healthier, stronger livestock!",
    "⭐ {product} - Feed Excellence Delivered! 🌾\nMaximize growth, maximize profits. Contact us!",
    "🐓 Give Your Animals The Best Start! 💪\n{product} - Scientifically formulated for success!",
    "🌾 {product} - Premium Nutrition, Premium Results! ✨\nJoin hundreds of satisfied farmers today!",
    "💯 {product} - The Feed That Delivers! 🐖\nHealthier animals, happier farmers. Order now!",
    "🔥 {product} - Transform Your Farm! 🌟\nFaster growth, better health. Get started today!",
];

/// Detailed long-form templates with hashtags
static LONG_TEMPLATES: [&str; 5] = [
    "🐄 Premium {product}! 🌾\n\nGive your livestock the nutrition they deserve! Scientifically formulated for optimal health and maximum growth 💪\n\nOrder now and see the difference!\n\n#AnimalFeeds #Livestock #FarmLife #QualityFeeds #HealthyAnimals #Agriculture",
    "🌟 FARMERS' CHOICE 🌟\n\n{product} - The feed that delivers real results!\n\n✅ Better weight gain\n✅ Improved milk production\n✅ Stronger immunity\n✅ Higher profits\n\nCall us today! 🐓\n\n#FarmSuccess #AnimalNutrition #Livestock #Poultry #Farming #QualityFeeds",
    "🐔 Superior Nutrition for Your Flock! 🐔\n\n{product} - Complete and balanced formula!\n\n🌾 High protein content\n🌾 Essential vitamins & minerals\n🌾 Better feed conversion ratio\n\nHealthy animals = Profitable farming! 📈\n\n#PoultryFarming #AnimalHealth #Livestock #FeedQuality #Agriculture",
    "💚 PROVEN RESULTS 💚\n\n{product} trusted by successful farmers!\n\n🚜 Faster growth rates\n🚜 Improved production\n🚜 Reduced mortality\n🚜 Maximum ROI\n\nAvailable now at competitive prices!\n\n#Farming #AnimalFeeds #Livestock #Agriculture #FarmBusiness #ProfitableFarming",
    "🌾 Transform Your Farm with {product}! 🌾\n\nPremium quality feeds with:\n✨ Balanced nutrition\n✨ Quality ingredients\n✨ Affordable prices\n✨ Fast delivery\n\nHealthier animals, bigger profits! 💰\n\nContact us to order!\n\n#FarmSupplies #AnimalNutrition #Livestock #Poultry #Agriculture",
];

/// Pick a template uniformly at random and interpolate the product
/// name. Total: cannot fail.
pub fn pick(product: &str, format: AdFormat) -> AdText {
    let pool: &[&str] = if format.is_short() {
        &SHORT_TEMPLATES
    } else {
        &LONG_TEMPLATES
    };
    let index = rand::thread_rng().gen_range(0..pool.len());
    AdText {
        body: pool[index].replace(PRODUCT_SLOT, product),
        source: AdSource::Template,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_carries_the_product_slot() {
        for template in SHORT_TEMPLATES.iter().chain(LONG_TEMPLATES.iter()) {
            assert!(
                template.contains(PRODUCT_SLOT),
                "template missing product slot: {template}"
            );
        }
    }

    #[test]
    fn picked_template_interpolates_product_verbatim() {
        for format in [AdFormat::Short, AdFormat::Long] {
            for _ in 0..50 {
                let ad = pick("Premium Layer Mash", format);
                assert!(!ad.body.is_empty());
                assert!(ad.body.contains("Premium Layer Mash"));
                assert!(!ad.body.contains(PRODUCT_SLOT));
                assert_eq!(ad.source, AdSource::Template);
            }
        }
    }
}

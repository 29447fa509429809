//! Prompt assembly for the brand-profile and match analyses.

use kolmatch_core::{BrandProfile, CandidateProfile, FacebookPageData, WebsiteData};

/// Character budget for long free-text sections embedded in a prompt.
const SECTION_CHAR_BUDGET: usize = 1000;

pub(crate) fn build_brand_prompt(fb: &FacebookPageData, website: &WebsiteData) -> String {
    let fb_text = format!(
        "FB Page Name: {}\nAbout: {}\nDescription: {}\nCategory: {}\n",
        fb.name, fb.about, fb.description, fb.category
    );

    let posts_text = fb.posts.join("\n");

    let website_text = format!(
        "Website Title: {}\nMeta Description: {}\nKeywords: {}\nContent Summary: {}\n",
        website.title,
        website.meta_description,
        website.keywords,
        truncate_chars(&website.content, SECTION_CHAR_BUDGET)
    );

    format!(
        "Based on the following Facebook page data and website information, analyze this brand's profile:\n\
         \n\
         FACEBOOK DATA:\n{fb_text}\n\
         WEBSITE DATA:\n{website_text}\n\
         RECENT FB POSTS:\n{posts}\n\
         \n\
         Please analyze and return a structured JSON object with the following:\n\
         1. \"industry\": The primary industry/sector of the business\n\
         2. \"target_audience\": Description of the likely target audience (age, interests, demographics)\n\
         3. \"brand_voice\": The tone and style of the brand (professional, casual, playful, etc.)\n\
         4. \"key_themes\": List of 5-10 key themes and topics that this brand focuses on\n\
         5. \"keywords\": List of 10-15 keywords that best describe this brand\n\
         \n\
         Return ONLY the JSON object, properly formatted.",
        posts = truncate_chars(&posts_text, SECTION_CHAR_BUDGET)
    )
}

pub(crate) fn build_match_prompt(brand: &BrandProfile, candidate: &CandidateProfile) -> String {
    let brand_text = format!(
        "Industry: {}\nTarget Audience: {}\nBrand Voice: {}\nKey Themes: {}\nKeywords: {}\n",
        brand.industry,
        brand.target_audience,
        brand.brand_voice,
        brand.key_themes.join(", "),
        brand.keywords.join(", ")
    );

    let kol_text = format!(
        "Username: {}\nNickname: {}\nBiography: {}\nFollowers: {}\nVideo Samples: {}\n",
        candidate.username,
        candidate.nickname,
        candidate.biography,
        candidate.follower_count,
        truncate_chars(&candidate.video_texts, SECTION_CHAR_BUDGET)
    );

    format!(
        "Based on the following brand profile and TikTok influencer (KOL) data, analyze how well they match:\n\
         \n\
         BRAND PROFILE:\n{brand_text}\n\
         TIKTOK KOL PROFILE:\n{kol_text}\n\
         \n\
         Please analyze and return a structured JSON object with the following:\n\
         1. \"match_score\": A number between 0-100 indicating how well this KOL matches the brand\n\
         2. \"audience_fit\": Description of how well the KOL's audience aligns with the brand's target audience\n\
         3. \"content_alignment\": How well the KOL's content style aligns with the brand's themes\n\
         4. \"collaboration_potential\": Potential types of collaborations that would work well\n\
         5. \"match_reasons\": List of 2-3 specific reasons why this KOL would be a good match\n\
         6. \"cautions\": List of 1-2 potential concerns or cautions about this match\n\
         \n\
         Return ONLY the JSON object, properly formatted."
    )
}

/// Truncate to at most `max` characters without splitting a code point.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

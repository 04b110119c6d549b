// Award classification of player seasons.
//
// MVP and the family's specialty award are independent tags: a season can
// carry both. A season is ordinary only when it carries neither.

use crate::data::records::{AwardCategory, AwardRecord};
use crate::stats::StatFamily;
use serde::Serialize;

/// Award tags attached to one season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AwardTags {
    pub mvp: bool,
    pub specialty: bool,
}

impl AwardTags {
    pub fn is_ordinary(&self) -> bool {
        !self.mvp && !self.specialty
    }
}

/// Classifies seasons of one statistic family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwardClassifier {
    family: StatFamily,
}

impl AwardClassifier {
    pub fn for_family(family: StatFamily) -> Self {
        AwardClassifier { family }
    }

    pub fn family(&self) -> StatFamily {
        self.family
    }

    /// The family's specialty award: Silver Slugger for batting, Cy Young
    /// for pitching, Gold Glove for fielding.
    pub fn specialty(&self) -> AwardCategory {
        match self.family {
            StatFamily::Batting => AwardCategory::SilverSlugger,
            StatFamily::Pitching => AwardCategory::CyYoung,
            StatFamily::Fielding => AwardCategory::GoldGlove,
        }
    }

    /// Tag `player_id`'s `year` from the award rows. Rows for other players
    /// or years, and awards of other families, are ignored.
    pub fn classify<'a, I>(&self, awards: I, player_id: &str, year: i32) -> AwardTags
    where
        I: IntoIterator<Item = &'a AwardRecord>,
    {
        let specialty = self.specialty();
        awards
            .into_iter()
            .filter(|a| a.year == year && a.player_id == player_id)
            .fold(AwardTags::default(), |mut tags, award| {
                if award.category == AwardCategory::MostValuablePlayer {
                    tags.mvp = true;
                } else if award.category == specialty {
                    tags.specialty = true;
                }
                tags
            })
    }
}

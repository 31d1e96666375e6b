// 评分模块 - PDP性格测试判定算法

use serde::Serialize;

/// 问卷题目数量
pub const ANSWER_COUNT: usize = 30;

/// 未能判定时的兜底标签
pub const UNKNOWN_LABEL: &str = "未知";

/// 性格原型
///
/// `ALL` 中的顺序即判定优先级，总分相同时排在前面的原型胜出
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    /// 老虎
    Tiger,
    /// 孔雀
    Peacock,
    /// 考拉
    Koala,
    /// 猫头鹰
    Owl,
    /// 变色龙
    Chameleon,
}

impl Archetype {
    /// 全部原型，按判定优先级排列
    pub const ALL: [Archetype; 5] = [
        Archetype::Tiger,
        Archetype::Peacock,
        Archetype::Koala,
        Archetype::Owl,
        Archetype::Chameleon,
    ];

    /// 原型对应的结果标签
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Tiger => "老虎",
            Archetype::Peacock => "孔雀",
            Archetype::Koala => "考拉",
            Archetype::Owl => "猫头鹰",
            Archetype::Chameleon => "变色龙",
        }
    }

    /// 原型对应的题号（1-30）
    ///
    /// 把第5、10、14、18、24、30题的分加起来就是"老虎"分数
    /// 把第3、6、13、20、22、29题的分加起来就是"孔雀"分数
    /// 把第2、8、15、17、25、28题的分加起来就是"考拉"分数
    /// 把第1、7、11、16、21、26题的分加起来就是"猫头鹰"分数
    /// 把第4、9、12、19、23、27题的分加起来就是"变色龙"分数
    pub fn positions(&self) -> [usize; 6] {
        match self {
            Archetype::Tiger => [5, 10, 14, 18, 24, 30],
            Archetype::Peacock => [3, 6, 13, 20, 22, 29],
            Archetype::Koala => [2, 8, 15, 17, 25, 28],
            Archetype::Owl => [1, 7, 11, 16, 21, 26],
            Archetype::Chameleon => [4, 9, 12, 19, 23, 27],
        }
    }

    /// 计算该原型在一组答案上的总分
    pub fn sum(&self, answers: &[u8; ANSWER_COUNT]) -> u32 {
        self.positions()
            .iter()
            .map(|&pos| answers[pos - 1] as u32)
            .sum()
    }
}

/// 五个维度的分数，随列表接口返回给前端展示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryScores {
    pub tiger: u32,
    pub peacock: u32,
    pub koala: u32,
    pub owl: u32,
    pub chameleon: u32,
}

impl CategoryScores {
    /// 从答案序列重新计算五个维度的分数
    pub fn from_answers(answers: &[u8; ANSWER_COUNT]) -> Self {
        Self {
            tiger: Archetype::Tiger.sum(answers),
            peacock: Archetype::Peacock.sum(answers),
            koala: Archetype::Koala.sum(answers),
            owl: Archetype::Owl.sum(answers),
            chameleon: Archetype::Chameleon.sum(answers),
        }
    }
}

/// 判定问卷结果
///
/// 按优先级遍历全部原型并记录当前最高分，后面的原型只有分数严格更高
/// 才会取代前面的，因此总分相同时优先级靠前的原型胜出。
/// 原型列表为空时返回 [`UNKNOWN_LABEL`]，固定五原型下不会发生。
pub fn classify(answers: &[u8; ANSWER_COUNT]) -> &'static str {
    let mut best: Option<(Archetype, u32)> = None;
    for archetype in Archetype::ALL {
        let sum = archetype.sum(answers);
        match best {
            Some((_, top)) if sum <= top => {}
            _ => best = Some((archetype, sum)),
        }
    }

    match best {
        Some((archetype, _)) => archetype.label(),
        None => UNKNOWN_LABEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造一份全零答案，再按 (题号, 分值) 填入指定题目
    fn answers_with(values: &[(usize, u8)]) -> [u8; ANSWER_COUNT] {
        let mut answers = [0u8; ANSWER_COUNT];
        for &(pos, value) in values {
            answers[pos - 1] = value;
        }
        answers
    }

    #[test]
    fn test_positions_partition() {
        // 五组题号应恰好覆盖 1-30 各一次，不重不漏
        let mut seen = [0u8; ANSWER_COUNT];
        for archetype in Archetype::ALL {
            for pos in archetype.positions() {
                assert!((1..=ANSWER_COUNT).contains(&pos), "题号越界: {}", pos);
                seen[pos - 1] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1), "题号划分不完整: {:?}", seen);
    }

    #[test]
    fn test_classify_single_category() {
        // 第5题属于老虎维度
        let answers = answers_with(&[(5, 5)]);
        assert_eq!(classify(&answers), "老虎");

        // 第4题属于变色龙维度
        let answers = answers_with(&[(4, 1)]);
        assert_eq!(classify(&answers), "变色龙");
    }

    #[test]
    fn test_classify_tie_breaks_by_priority() {
        // 孔雀(第3题)与考拉(第17题)同分，孔雀优先级更高
        let answers = answers_with(&[(3, 3), (17, 3)]);
        assert_eq!(classify(&answers), "孔雀");

        // 全零答案五个维度全部同分，老虎排第一
        assert_eq!(classify(&[0u8; ANSWER_COUNT]), "老虎");

        // 全部答案相同，五个维度依然同分
        assert_eq!(classify(&[3u8; ANSWER_COUNT]), "老虎");
    }

    #[test]
    fn test_classify_deterministic() {
        let answers = answers_with(&[(1, 5), (7, 4), (11, 3), (20, 2), (28, 1)]);
        let first = classify(&answers);
        assert_eq!(first, "猫头鹰");
        for _ in 0..10 {
            assert_eq!(classify(&answers), first);
        }
    }

    #[test]
    fn test_classify_total_on_max_input() {
        // u8 上限也不会溢出：每个维度最多 6 * 255
        let answers = [u8::MAX; ANSWER_COUNT];
        let label = classify(&answers);
        assert_eq!(label, "老虎");
        for archetype in Archetype::ALL {
            assert_eq!(archetype.sum(&answers), 6 * u8::MAX as u32);
        }
    }

    #[test]
    fn test_category_scores_match_sums() {
        let answers = answers_with(&[(5, 2), (10, 3), (3, 4), (2, 1), (1, 5), (4, 2)]);
        let scores = CategoryScores::from_answers(&answers);
        assert_eq!(scores.tiger, 5);
        assert_eq!(scores.peacock, 4);
        assert_eq!(scores.koala, 1);
        assert_eq!(scores.owl, 5);
        assert_eq!(scores.chameleon, 2);
    }
}
